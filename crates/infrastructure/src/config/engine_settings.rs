//! Layered engine settings.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults
//! - a settings file: the explicit path if given, otherwise
//!   `<config dir>/stencil/settings.{yaml,json}` when present
//! - `STENCIL_*` environment variables, nested keys separated by `__`
//!   (e.g. `STENCIL_INVALID_FORMAT__PREFIX`)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use stencil_application::TemplateConfig;
use stencil_application::template_engine::RegexMatcher;
use stencil_application::template_engine::formatters::count_grouping;
use stencil_domain::{DomainError, InvalidFormat};

const ENV_PREFIX: &str = "STENCIL";
const SETTINGS_FILE_NAMES: &[&str] = &["settings.yaml", "settings.yml", "settings.json"];

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or the merged settings are malformed.
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// The configured placeholder pattern is unusable.
    #[error(transparent)]
    Pattern(#[from] DomainError),
}

/// Built-in placeholder syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Syntax {
    /// `{path}`
    #[default]
    Braces,
    /// `[[path]]`
    DoubleBrackets,
    /// `{{path}}`
    DoubleBraces,
}

impl Syntax {
    /// Returns the matcher for this syntax.
    #[must_use]
    pub fn matcher(self) -> RegexMatcher {
        match self {
            Self::Braces => RegexMatcher::braces(),
            Self::DoubleBrackets => RegexMatcher::double_brackets(),
            Self::DoubleBraces => RegexMatcher::double_braces(),
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Braces => "braces",
            Self::DoubleBrackets => "double-brackets",
            Self::DoubleBraces => "double-braces",
        })
    }
}

impl FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "braces" => Ok(Self::Braces),
            "double-brackets" => Ok(Self::DoubleBrackets),
            "double-braces" => Ok(Self::DoubleBraces),
            other => Err(format!(
                "unknown syntax '{other}' (expected braces, double-brackets or double-braces)"
            )),
        }
    }
}

/// Engine defaults as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Keep unresolved placeholders in the output.
    pub keep_invalid: bool,
    /// Built-in placeholder syntax.
    pub syntax: Syntax,
    /// Custom placeholder regex with one capture group; overrides `syntax`.
    pub pattern: Option<String>,
    /// Decoration around kept placeholders.
    pub invalid_format: InvalidFormat,
    /// Group digits of numbers whose path mentions "count".
    pub group_counts: bool,
}

impl EngineSettings {
    /// Loads settings from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is unreadable or holds invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using settings file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                for candidate in Self::default_paths() {
                    builder = builder.add_source(File::from(candidate).required(false));
                }
            }
        }

        let settings: Self = builder
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        tracing::debug!(?settings, "loaded engine settings");
        Ok(settings)
    }

    /// Returns the directory holding the settings file, if available.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stencil"))
    }

    fn default_paths() -> Vec<PathBuf> {
        Self::config_dir()
            .map(|dir| SETTINGS_FILE_NAMES.iter().map(|name| dir.join(name)).collect())
            .unwrap_or_default()
    }

    /// Builds the engine configuration these settings describe.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Pattern` if the custom pattern does not compile
    /// or lacks exactly one capture group.
    pub fn to_template_config(&self) -> Result<TemplateConfig, ConfigError> {
        let matcher = match &self.pattern {
            Some(pattern) => RegexMatcher::new(pattern)?,
            None => self.syntax.matcher(),
        };

        let config = TemplateConfig::new()
            .with_keep_invalid(self.keep_invalid)
            .with_matcher(matcher)
            .with_invalid_format(self.invalid_format.clone());

        Ok(if self.group_counts {
            config.with_formatter(count_grouping())
        } else {
            config
        })
    }
}
