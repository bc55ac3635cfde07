//! Stencil command line binary.

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use stencil_application::template_engine::find_placeholders;
use stencil_application::use_cases::strip_final_newline;
use stencil_application::{
    ConfigOverride, LoadTemplates, RenderTemplate, TemplateEngine, TemplateRegistry,
};
use stencil_domain::DataContext;
use stencil_infrastructure::{EngineSettings, TokioFileSystem, load_context};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, DataArgs, TemplateSource};

// Id used for inline and single-file templates
const INLINE_ID: &str = "inline";

fn setup_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_logging();

    let cli = Cli::parse();
    let settings =
        EngineSettings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let config = settings
        .to_template_config()
        .context("Invalid engine settings")?;
    let registry = Arc::new(TemplateRegistry::with_engine(TemplateEngine::with_config(
        config,
    )));

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "stencil starting");

    match cli.command {
        Command::Render {
            source,
            data,
            syntax,
            decoration,
            keep_invalid,
            strict,
        } => {
            let id = register_source(&registry, &source).await?;
            let context = load_data(&data).await?;

            let mut overrides = decoration.apply(syntax.apply(ConfigOverride::new())?);
            if keep_invalid {
                overrides = overrides.keep_invalid(true);
            }

            let output = RenderTemplate::new(Arc::clone(&registry)).execute(
                &id,
                &context,
                &overrides,
            )?;
            println!("{}", output.rendered);

            if strict && !output.is_complete() {
                eprintln!(
                    "unresolved placeholders: {}",
                    output.validation.missing.join(", ")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Preview {
            source,
            data,
            syntax,
            decoration,
        } => {
            let id = register_source(&registry, &source).await?;
            let template = template_text(&registry, &id)?;
            let context = load_data(&data).await?;
            let overrides = decoration.apply(syntax.apply(ConfigOverride::new())?);

            println!(
                "{}",
                registry
                    .engine()
                    .create_preview_with(&template, &context, &overrides)
            );
        }
        Command::Validate {
            source,
            data,
            syntax,
        } => {
            let id = register_source(&registry, &source).await?;
            let template = template_text(&registry, &id)?;
            let context = load_data(&data).await?;
            let overrides = syntax.apply(ConfigOverride::new())?;

            let result = registry
                .engine()
                .validate_with(&template, &context, &overrides);
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.is_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Placeholders { source, syntax } => {
            let id = register_source(&registry, &source).await?;
            let template = template_text(&registry, &id)?;
            let overrides = syntax.apply(ConfigOverride::new())?;
            let config = registry.engine().config().apply(&overrides);

            for path in find_placeholders(&template, config.matcher.as_ref()) {
                println!("{path}");
            }
        }
        Command::List { dir } => {
            load_dir(&registry, &dir).await?;
            for id in registry.list() {
                println!("{id}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Registers the template named on the command line and returns its id.
async fn register_source(registry: &TemplateRegistry, source: &TemplateSource) -> Result<String> {
    if let (Some(dir), Some(name)) = (&source.dir, &source.name) {
        load_dir(registry, dir).await?;
        if !registry.has(name) {
            bail!("template '{name}' not found in {}", dir.display());
        }
        return Ok(name.clone());
    }

    let template = if let Some(path) = &source.file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        strip_final_newline(&content).to_string()
    } else if let Some(text) = &source.template {
        text.clone()
    } else {
        bail!("no template given: pass inline text, --file or --dir with --name");
    };

    registry.register(INLINE_ID, template);
    Ok(INLINE_ID.to_string())
}

async fn load_dir(registry: &TemplateRegistry, dir: &Path) -> Result<()> {
    let output = LoadTemplates::new(TokioFileSystem::new())
        .execute(dir, registry)
        .await
        .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
    for skipped in &output.skipped {
        tracing::debug!(path = %skipped.display(), "skipped directory entry");
    }
    Ok(())
}

fn template_text(registry: &TemplateRegistry, id: &str) -> Result<String> {
    registry
        .get_template(id)
        .with_context(|| format!("template '{id}' is not registered"))
}

async fn load_data(data: &DataArgs) -> Result<DataContext> {
    match &data.data {
        Some(path) => load_context(path)
            .await
            .with_context(|| format!("Failed to load data from {}", path.display())),
        None => Ok(DataContext::new()),
    }
}
