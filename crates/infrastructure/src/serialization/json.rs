//! JSON data files.

use stencil_domain::DataContext;

use super::SerializationError;

/// Parses a JSON object into a `DataContext`.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or its top level is not an object.
pub fn context_from_json(json: &str) -> Result<DataContext, SerializationError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(DataContext::try_from(value)?)
}
