//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stencil_application::ConfigOverride;
use stencil_application::template_engine::RegexMatcher;
use stencil_infrastructure::Syntax;

/// Render `{path}` templates against JSON or YAML data.
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template, substituting placeholders
    Render {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        syntax: SyntaxArgs,

        #[command(flatten)]
        decoration: DecorationArgs,

        /// Keep unresolved placeholders in the output
        #[arg(short, long)]
        keep_invalid: bool,

        /// Exit with an error status if any placeholder is unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Render keeping every unresolved placeholder visible
    Preview {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        syntax: SyntaxArgs,

        #[command(flatten)]
        decoration: DecorationArgs,
    },

    /// Report which placeholders resolve, as JSON
    Validate {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },

    /// List the unique placeholder paths of a template
    Placeholders {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },

    /// List the templates found in a directory
    List {
        /// Directory of *.tmpl, *.template or *.txt files
        #[arg(short, long, required = true)]
        dir: PathBuf,
    },
}

/// Where the template text comes from.
#[derive(Args, Debug)]
pub struct TemplateSource {
    /// Inline template text
    #[arg(required_unless_present_any = ["file", "dir"])]
    pub template: Option<String>,

    /// Read the template from a file
    #[arg(short, long, conflicts_with_all = ["template", "dir"])]
    pub file: Option<PathBuf>,

    /// Load templates from a directory (use with --name)
    #[arg(short, long, requires = "name", conflicts_with = "template")]
    pub dir: Option<PathBuf>,

    /// Id of the template to use from --dir
    #[arg(short, long, requires = "dir")]
    pub name: Option<String>,
}

/// Data context input.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// JSON or YAML file holding the data context
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Placeholder syntax selection.
#[derive(Args, Debug)]
pub struct SyntaxArgs {
    /// Built-in placeholder syntax: braces, double-brackets, double-braces
    #[arg(short, long)]
    pub syntax: Option<Syntax>,

    /// Custom placeholder regex with exactly one capture group
    #[arg(short, long, conflicts_with = "syntax")]
    pub pattern: Option<String>,
}

/// Decoration of kept placeholders.
#[derive(Args, Debug)]
pub struct DecorationArgs {
    /// Text placed before kept placeholders
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text placed after kept placeholders
    #[arg(long)]
    pub suffix: Option<String>,
}

impl SyntaxArgs {
    /// Adds the matcher selected on the command line, if any.
    pub fn apply(&self, overrides: ConfigOverride) -> anyhow::Result<ConfigOverride> {
        Ok(match (&self.pattern, self.syntax) {
            (Some(pattern), _) => overrides.matcher(RegexMatcher::new(pattern)?),
            (None, Some(syntax)) => overrides.matcher(syntax.matcher()),
            (None, None) => overrides,
        })
    }
}

impl DecorationArgs {
    /// Adds the prefix and suffix given on the command line, if any.
    pub fn apply(&self, mut overrides: ConfigOverride) -> ConfigOverride {
        if let Some(prefix) = &self.prefix {
            overrides = overrides.prefix(prefix.clone());
        }
        if let Some(suffix) = &self.suffix {
            overrides = overrides.suffix(suffix.clone());
        }
        overrides
    }
}
