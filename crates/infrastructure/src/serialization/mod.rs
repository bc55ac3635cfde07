//! Parsing of data files into a `DataContext`.
//!
//! JSON and YAML documents are accepted; the top level must be a mapping.

mod json;
mod yaml;

use std::path::{Path, PathBuf};

use stencil_domain::{DataContext, DomainError};
use tokio::fs;

pub use json::context_from_json;
pub use yaml::context_from_yaml;

/// Error type for data-file parsing.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON parsing failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but is not a usable context.
    #[error(transparent)]
    Context(#[from] DomainError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension is neither JSON nor YAML.
    #[error("Unsupported data file format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DataFormat {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parses `content` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed or its top level is not a mapping.
    pub fn parse(self, content: &str) -> Result<DataContext, SerializationError> {
        match self {
            Self::Json => context_from_json(content),
            Self::Yaml => context_from_yaml(content),
        }
    }
}

/// Reads a JSON or YAML file into a `DataContext`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension
/// or does not hold a mapping.
pub async fn load_context(path: &Path) -> Result<DataContext, SerializationError> {
    let format = DataFormat::from_path(path)
        .ok_or_else(|| SerializationError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).await?;
    let context = format.parse(&content)?;
    tracing::debug!(path = %path.display(), keys = context.root().len(), "loaded data context");
    Ok(context)
}
