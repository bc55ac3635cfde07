//! Engine settings loaded from files and the environment.

mod engine_settings;

pub use engine_settings::{ConfigError, EngineSettings, Syntax};
