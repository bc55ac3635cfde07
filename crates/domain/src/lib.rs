//! Stencil Domain - Core templating types
//!
//! This crate defines the data model shared by every Stencil layer:
//! values, data contexts (with dotted-path resolution), validation
//! reports and the decoration applied to unresolved placeholders.
//! All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod error;
pub mod template;
pub mod validation;
pub mod value;

pub use context::DataContext;
pub use error::{DomainError, DomainResult};
pub use template::InvalidFormat;
pub use validation::ValidationResult;
pub use value::{Map, Value};
