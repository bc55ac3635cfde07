//! Template rendering engine
//!
//! Substitutes placeholders with values resolved from a `DataContext`,
//! validates templates against a context and extracts placeholder paths.

use stencil_domain::{DataContext, ValidationResult};

use super::config::{ConfigOverride, TemplateConfig};
use super::matcher::{PlaceholderMatcher, find_placeholders};

/// The template engine.
///
/// Holds only its default configuration; every call is a pure function of
/// its arguments, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: TemplateConfig,
}

impl TemplateEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given default configuration.
    #[must_use]
    pub const fn with_config(config: TemplateConfig) -> Self {
        Self { config }
    }

    /// Returns the engine's default configuration.
    #[must_use]
    pub const fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Renders the template with the engine's configuration.
    #[must_use]
    pub fn render(&self, template: &str, context: &DataContext) -> String {
        Self::substitute(template, context, &self.config)
    }

    /// Renders the template with `overrides` laid over the engine's
    /// configuration for this call only.
    #[must_use]
    pub fn render_with(
        &self,
        template: &str,
        context: &DataContext,
        overrides: &ConfigOverride,
    ) -> String {
        if overrides.is_empty() {
            return self.render(template, context);
        }
        Self::substitute(template, context, &self.config.apply(overrides))
    }

    /// Renders keeping every unresolved placeholder visible.
    #[must_use]
    pub fn create_preview(&self, template: &str, context: &DataContext) -> String {
        self.create_preview_with(template, context, &ConfigOverride::new())
    }

    /// Like `create_preview`, with extra overrides. `keep_invalid` is always
    /// forced on, whatever `overrides` says.
    #[must_use]
    pub fn create_preview_with(
        &self,
        template: &str,
        context: &DataContext,
        overrides: &ConfigOverride,
    ) -> String {
        let mut effective = self.config.apply(overrides);
        effective.keep_invalid = true;
        Self::substitute(template, context, &effective)
    }

    /// Checks which unique placeholders resolve against the context.
    #[must_use]
    pub fn validate(&self, template: &str, context: &DataContext) -> ValidationResult {
        Self::partition(template, context, self.config.matcher.as_ref())
    }

    /// Like `validate`, finding placeholders with the override's matcher when
    /// it sets one. Only the matcher affects validation.
    #[must_use]
    pub fn validate_with(
        &self,
        template: &str,
        context: &DataContext,
        overrides: &ConfigOverride,
    ) -> ValidationResult {
        let matcher = overrides.matcher.as_ref().unwrap_or(&self.config.matcher);
        Self::partition(template, context, matcher.as_ref())
    }

    fn partition(
        template: &str,
        context: &DataContext,
        matcher: &dyn PlaceholderMatcher,
    ) -> ValidationResult {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for path in find_placeholders(template, matcher) {
            if context.resolve(&path).is_some() {
                valid.push(path);
            } else {
                invalid.push(path);
            }
        }

        tracing::debug!(
            valid = valid.len(),
            invalid = invalid.len(),
            "validated template"
        );

        ValidationResult::from_partition(valid, invalid)
    }

    /// Extracts the unique placeholder paths, in order of first appearance.
    #[must_use]
    pub fn extract_placeholders(&self, template: &str) -> Vec<String> {
        find_placeholders(template, self.config.matcher.as_ref())
    }

    fn substitute(template: &str, context: &DataContext, config: &TemplateConfig) -> String {
        let matches = config.matcher.find_all(template);

        if matches.is_empty() {
            return template.to_string();
        }

        let mut result = String::with_capacity(template.len());
        let mut last_end = 0;
        let mut unresolved = 0usize;

        for placeholder in &matches {
            // Skip overlapping or out-of-order spans from custom matchers
            if placeholder.span.start < last_end {
                continue;
            }
            let (Some(before), Some(original)) = (
                template.get(last_end..placeholder.span.start),
                template.get(placeholder.span.clone()),
            ) else {
                continue;
            };

            // Append text before this placeholder
            result.push_str(before);

            if let Some(value) = context.resolve(&placeholder.path) {
                result.push_str(&config.formatter.format(value, &placeholder.path));
            } else {
                unresolved += 1;
                tracing::trace!(path = %placeholder.path, "unresolved placeholder");
                if config.keep_invalid {
                    result.push_str(&config.invalid_format.decorate(original));
                }
            }

            last_end = placeholder.span.end;
        }

        // Append remaining text after last placeholder
        result.push_str(template.get(last_end..).unwrap_or_default());

        tracing::debug!(
            placeholders = matches.len(),
            unresolved,
            keep_invalid = config.keep_invalid,
            "rendered template"
        );

        result
    }
}
