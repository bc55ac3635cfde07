//! Template engine module
//!
//! Provides matching, formatting and substitution of `{path}` placeholders.
//!
//! # Usage
//!
//! ```
//! use stencil_application::template_engine::{self, ConfigOverride, RegexMatcher};
//! use stencil_domain::DataContext;
//!
//! let context = DataContext::new().with("name", "John");
//!
//! assert_eq!(template_engine::render("Hello {name}!", &context), "Hello John!");
//! assert_eq!(template_engine::render("{name} is {age}", &context), "John is ");
//!
//! let keep = ConfigOverride::new().keep_invalid(true);
//! assert_eq!(
//!     template_engine::render_with("{name} is {age}", &context, &keep),
//!     "John is {age}"
//! );
//!
//! let brackets = ConfigOverride::new().matcher(RegexMatcher::double_brackets());
//! assert_eq!(
//!     template_engine::render_with("Hi [[name]]", &context, &brackets),
//!     "Hi John"
//! );
//! ```

pub mod config;
pub mod engine;
pub mod formatter;
pub mod formatters;
pub mod matcher;

pub use config::{ConfigOverride, TemplateConfig};
pub use engine::TemplateEngine;
pub use formatter::{DisplayFormatter, ValueFormatter};
pub use matcher::{
    PlaceholderMatch, PlaceholderMatcher, RegexMatcher, find_placeholders, has_placeholders,
};

use stencil_domain::{DataContext, ValidationResult};

/// Renders with a default-configured engine.
#[must_use]
pub fn render(template: &str, context: &DataContext) -> String {
    TemplateEngine::new().render(template, context)
}

/// Renders with a default-configured engine and per-call overrides.
#[must_use]
pub fn render_with(template: &str, context: &DataContext, overrides: &ConfigOverride) -> String {
    TemplateEngine::new().render_with(template, context, overrides)
}

/// Validates with a default-configured engine.
#[must_use]
pub fn validate(template: &str, context: &DataContext) -> ValidationResult {
    TemplateEngine::new().validate(template, context)
}

/// Extracts unique `{path}` placeholders in order of first appearance.
#[must_use]
pub fn extract_placeholders(template: &str) -> Vec<String> {
    TemplateEngine::new().extract_placeholders(template)
}

/// Renders a preview that keeps unresolved placeholders.
#[must_use]
pub fn create_preview(template: &str, context: &DataContext) -> String {
    TemplateEngine::new().create_preview(template, context)
}
