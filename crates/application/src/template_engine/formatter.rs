//! Value formatting before insertion.

use stencil_domain::Value;

/// Converts a resolved value into the text inserted into the template.
///
/// The placeholder path is passed along so formatting can depend on it.
pub trait ValueFormatter: Send + Sync {
    /// Formats `value`, found at `path`.
    fn format(&self, value: &Value, path: &str) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(&Value, &str) -> String + Send + Sync,
{
    fn format(&self, value: &Value, path: &str) -> String {
        self(value, path)
    }
}

/// The default formatter: the value's natural text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter;

impl ValueFormatter for DisplayFormatter {
    fn format(&self, value: &Value, _path: &str) -> String {
        value.to_string()
    }
}
