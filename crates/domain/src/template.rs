//! Decoration for placeholders that could not be resolved.

use serde::{Deserialize, Serialize};

/// Prefix and suffix wrapped around an unresolved placeholder when it is kept
/// in the output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidFormat {
    /// Text inserted before the original placeholder.
    pub prefix: String,
    /// Text inserted after the original placeholder.
    pub suffix: String,
}

impl InvalidFormat {
    /// Creates a decoration with the given prefix and suffix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Wraps the original placeholder text.
    #[must_use]
    pub fn decorate(&self, placeholder: &str) -> String {
        let mut out =
            String::with_capacity(self.prefix.len() + placeholder.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(placeholder);
        out.push_str(&self.suffix);
        out
    }

    /// Returns true if neither prefix nor suffix is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}
