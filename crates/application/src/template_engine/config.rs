//! Engine configuration and per-call overrides
//!
//! `TemplateConfig` is the effective configuration of an engine.
//! `ConfigOverride` is laid over it for a single call: every field that is
//! set replaces the engine's value, unset fields keep it. The
//! `invalid_format` decoration is merged per field.

use std::fmt;
use std::sync::Arc;

use stencil_domain::InvalidFormat;

use super::formatter::{DisplayFormatter, ValueFormatter};
use super::matcher::{PlaceholderMatcher, RegexMatcher};

/// Effective configuration used to render a template.
#[derive(Clone)]
pub struct TemplateConfig {
    /// Keep unresolved placeholders (decorated) instead of deleting them.
    pub keep_invalid: bool,

    /// Rule used to find placeholders.
    pub matcher: Arc<dyn PlaceholderMatcher>,

    /// Converts resolved values to text.
    pub formatter: Arc<dyn ValueFormatter>,

    /// Decoration for kept unresolved placeholders.
    pub invalid_format: InvalidFormat,
}

impl TemplateConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `keep_invalid`.
    #[must_use]
    pub fn with_keep_invalid(mut self, keep_invalid: bool) -> Self {
        self.keep_invalid = keep_invalid;
        self
    }

    /// Sets the placeholder matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl PlaceholderMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    /// Sets the value formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Sets the invalid placeholder decoration.
    #[must_use]
    pub fn with_invalid_format(mut self, invalid_format: InvalidFormat) -> Self {
        self.invalid_format = invalid_format;
        self
    }

    /// Returns the configuration produced by laying `overrides` over `self`.
    #[must_use]
    pub fn apply(&self, overrides: &ConfigOverride) -> Self {
        let mut effective = self.clone();

        if let Some(keep_invalid) = overrides.keep_invalid {
            effective.keep_invalid = keep_invalid;
        }
        if let Some(matcher) = &overrides.matcher {
            effective.matcher = Arc::clone(matcher);
        }
        if let Some(formatter) = &overrides.formatter {
            effective.formatter = Arc::clone(formatter);
        }
        if let Some(prefix) = &overrides.prefix {
            effective.invalid_format.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &overrides.suffix {
            effective.invalid_format.suffix.clone_from(suffix);
        }

        effective
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            keep_invalid: false,
            matcher: Arc::new(RegexMatcher::braces()),
            formatter: Arc::new(DisplayFormatter),
            invalid_format: InvalidFormat::default(),
        }
    }
}

impl fmt::Debug for TemplateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateConfig")
            .field("keep_invalid", &self.keep_invalid)
            .field("pattern", &self.matcher.pattern())
            .field("invalid_format", &self.invalid_format)
            .finish_non_exhaustive()
    }
}

/// Per-call configuration layer. Unset fields inherit from the engine.
#[derive(Clone, Default)]
pub struct ConfigOverride {
    /// Overrides `keep_invalid`.
    pub keep_invalid: Option<bool>,

    /// Overrides the placeholder matcher.
    pub matcher: Option<Arc<dyn PlaceholderMatcher>>,

    /// Overrides the value formatter.
    pub formatter: Option<Arc<dyn ValueFormatter>>,

    /// Overrides the decoration prefix only.
    pub prefix: Option<String>,

    /// Overrides the decoration suffix only.
    pub suffix: Option<String>,
}

impl ConfigOverride {
    /// Creates an empty override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `keep_invalid`.
    #[must_use]
    pub fn keep_invalid(mut self, keep_invalid: bool) -> Self {
        self.keep_invalid = Some(keep_invalid);
        self
    }

    /// Sets the placeholder matcher.
    #[must_use]
    pub fn matcher(mut self, matcher: impl PlaceholderMatcher + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Sets the value formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Sets the decoration prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the decoration suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets both decoration fields.
    #[must_use]
    pub fn invalid_format(self, invalid_format: InvalidFormat) -> Self {
        self.prefix(invalid_format.prefix).suffix(invalid_format.suffix)
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keep_invalid.is_none()
            && self.matcher.is_none()
            && self.formatter.is_none()
            && self.prefix.is_none()
            && self.suffix.is_none()
    }
}

impl fmt::Debug for ConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverride")
            .field("keep_invalid", &self.keep_invalid)
            .field("pattern", &self.matcher.as_ref().map(|m| m.pattern().to_string()))
            .field("has_formatter", &self.formatter.is_some())
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .finish()
    }
}
