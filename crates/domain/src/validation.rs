//! Placeholder validation report

use serde::{Deserialize, Serialize};

/// Result of checking which placeholders of a template can be resolved.
///
/// `missing` always mirrors `invalid`; both are part of the public contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether every placeholder resolved.
    pub is_valid: bool,

    /// Placeholders that resolved to a present value.
    pub valid: Vec<String>,

    /// Placeholders that did not resolve.
    pub invalid: Vec<String>,

    /// Same as `invalid`.
    pub missing: Vec<String>,
}

impl ValidationResult {
    /// Builds a report from resolved and unresolved placeholder paths.
    #[must_use]
    pub fn from_partition(valid: Vec<String>, invalid: Vec<String>) -> Self {
        Self {
            is_valid: invalid.is_empty(),
            valid,
            missing: invalid.clone(),
            invalid,
        }
    }

    /// Returns the count of resolved placeholders.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    /// Returns the count of unresolved placeholders.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_partition_mirrors_missing() {
        let result = ValidationResult::from_partition(
            vec!["user.name".to_string()],
            vec!["user.email".to_string()],
        );
        assert!(!result.is_valid);
        assert_eq!(result.invalid, result.missing);
        assert_eq!(result.valid_count(), 1);
        assert_eq!(result.invalid_count(), 1);
    }

    #[test]
    fn test_empty_is_valid() {
        let result = ValidationResult::from_partition(Vec::new(), Vec::new());
        assert!(result.is_valid);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = ValidationResult::from_partition(vec!["a".to_string()], Vec::new());
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"isValid":true,"valid":["a"],"invalid":[],"missing":[]}"#
        );
    }
}
