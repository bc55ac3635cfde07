//! Stencil Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, data-file parsing and the
//! layered engine settings.

pub mod config;
pub mod persistence;
pub mod serialization;

pub use crate::config::{ConfigError, EngineSettings, Syntax};
pub use persistence::TokioFileSystem;
pub use serialization::{
    DataFormat, SerializationError, context_from_json, context_from_yaml, load_context,
};
