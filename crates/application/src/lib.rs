//! Stencil Application - Templating engine and use cases
//!
//! This crate defines the application layer with:
//! - The template engine (placeholder matching, formatting, substitution)
//! - The named template registry
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration

pub mod error;
pub mod ports;
pub mod registry;
pub mod template_engine;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use registry::TemplateRegistry;
pub use template_engine::{
    ConfigOverride, DisplayFormatter, PlaceholderMatch, PlaceholderMatcher, RegexMatcher,
    TemplateConfig, TemplateEngine, ValueFormatter,
};
pub use use_cases::{
    LoadTemplates, LoadTemplatesError, LoadTemplatesOutput, RenderTemplate, RenderTemplateOutput,
};
