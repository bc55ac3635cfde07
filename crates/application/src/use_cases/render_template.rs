//! Render template use case

use std::sync::Arc;

use stencil_domain::{DataContext, ValidationResult};

use crate::error::{ApplicationError, ApplicationResult};
use crate::registry::TemplateRegistry;
use crate::template_engine::ConfigOverride;

/// Output of rendering a registered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTemplateOutput {
    /// The rendered text.
    pub rendered: String,
    /// Which placeholders resolved, found with the same matcher as the render.
    pub validation: ValidationResult,
}

impl RenderTemplateOutput {
    /// Returns true if every placeholder was substituted.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.validation.is_valid
    }
}

/// Renders a registered template and reports its unresolved placeholders.
pub struct RenderTemplate {
    registry: Arc<TemplateRegistry>,
}

impl RenderTemplate {
    /// Creates a new `RenderTemplate` use case.
    #[must_use]
    pub const fn new(registry: Arc<TemplateRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry templates are looked up in.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::TemplateNotFound` if `id` is not registered.
    pub fn execute(
        &self,
        id: &str,
        context: &DataContext,
        overrides: &ConfigOverride,
    ) -> ApplicationResult<RenderTemplateOutput> {
        let template = self
            .registry
            .get_template(id)
            .ok_or_else(|| ApplicationError::TemplateNotFound(id.to_string()))?;

        let engine = self.registry.engine();
        let rendered = engine.render_with(&template, context, overrides);
        let validation = engine.validate_with(&template, context, overrides);

        if !validation.is_valid {
            tracing::info!(
                id,
                missing = validation.missing.len(),
                "template rendered with unresolved placeholders"
            );
        }

        Ok(RenderTemplateOutput {
            rendered,
            validation,
        })
    }
}
