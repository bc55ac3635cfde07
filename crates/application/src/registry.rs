//! Named template registry.
//!
//! Stores templates under string identifiers and delegates rendering and
//! validation to a shared `TemplateEngine`. Safe to share behind an `Arc`.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use stencil_domain::{DataContext, ValidationResult};

use crate::error::{ApplicationError, ApplicationResult};
use crate::template_engine::{ConfigOverride, TemplateConfig, TemplateEngine};

/// Thread-safe store of named templates.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    engine: TemplateEngine,
    templates: RwLock<IndexMap<String, String>>,
}

impl TemplateRegistry {
    /// Creates an empty registry with a default engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry rendering with the given engine.
    #[must_use]
    pub fn with_engine(engine: TemplateEngine) -> Self {
        Self {
            engine,
            templates: RwLock::new(IndexMap::new()),
        }
    }

    /// Creates an empty registry whose engine uses `config`.
    #[must_use]
    pub fn with_config(config: TemplateConfig) -> Self {
        Self::with_engine(TemplateEngine::with_config(config))
    }

    /// Returns the engine used for rendering.
    #[must_use]
    pub const fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    // Entries are plain strings, so a poisoned lock still holds usable data
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, String>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, String>> {
        self.templates.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a template, replacing any template with the same id.
    pub fn register(&self, id: impl Into<String>, template: impl Into<String>) {
        let id = id.into();
        tracing::debug!(id = %id, "registering template");
        self.write().insert(id, template.into());
    }

    /// Removes a template. Returns true if it was registered.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.write().shift_remove(id).is_some();
        if removed {
            tracing::debug!(id, "unregistered template");
        }
        removed
    }

    /// Returns true if a template is registered under `id`.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Returns all registered ids in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Returns the template registered under `id`.
    #[must_use]
    pub fn get_template(&self, id: &str) -> Option<String> {
        self.read().get(id).cloned()
    }

    /// Removes every template.
    pub fn clear(&self) {
        let mut templates = self.write();
        tracing::debug!(count = templates.len(), "clearing template registry");
        templates.clear();
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no template is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn require(&self, id: &str) -> ApplicationResult<String> {
        self.get_template(id).ok_or_else(|| {
            tracing::debug!(id, "template lookup failed");
            ApplicationError::TemplateNotFound(id.to_string())
        })
    }

    /// Renders the template registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::TemplateNotFound` if `id` is not registered.
    pub fn render(&self, id: &str, context: &DataContext) -> ApplicationResult<String> {
        let template = self.require(id)?;
        Ok(self.engine.render(&template, context))
    }

    /// Renders the template registered under `id` with per-call overrides.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::TemplateNotFound` if `id` is not registered.
    pub fn render_with(
        &self,
        id: &str,
        context: &DataContext,
        overrides: &ConfigOverride,
    ) -> ApplicationResult<String> {
        let template = self.require(id)?;
        Ok(self.engine.render_with(&template, context, overrides))
    }

    /// Validates the template registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::TemplateNotFound` if `id` is not registered.
    pub fn validate(&self, id: &str, context: &DataContext) -> ApplicationResult<ValidationResult> {
        let template = self.require(id)?;
        Ok(self.engine.validate(&template, context))
    }

    /// Renders a preview of the template registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::TemplateNotFound` if `id` is not registered.
    pub fn preview(&self, id: &str, context: &DataContext) -> ApplicationResult<String> {
        let template = self.require(id)?;
        Ok(self.engine.create_preview(&template, context))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;
    use stencil_domain::InvalidFormat;

    fn create_test_registry() -> TemplateRegistry {
        let registry = TemplateRegistry::new();
        registry.register("welcome", "Welcome, {user.name}!");
        registry.register("reminder", "You have {count} new messages");
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = create_test_registry();
        assert!(registry.has("welcome"));
        assert!(!registry.has("missing"));
        assert_eq!(
            registry.get_template("welcome"),
            Some("Welcome, {user.name}!".to_string())
        );
        assert_eq!(registry.get_template("missing"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_in_registration_order() {
        let registry = create_test_registry();
        registry.register("alpha", "a");
        assert_eq!(registry.list(), vec!["welcome", "reminder", "alpha"]);
    }

    #[test]
    fn test_register_replaces() {
        let registry = create_test_registry();
        registry.register("welcome", "Hi {user.name}");
        assert_eq!(registry.get_template("welcome"), Some("Hi {user.name}".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister() {
        let registry = create_test_registry();
        assert!(registry.unregister("welcome"));
        assert!(!registry.unregister("welcome"));
        assert_eq!(registry.list(), vec!["reminder"]);
    }

    #[test]
    fn test_clear() {
        let registry = create_test_registry();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_render_registered() {
        let registry = create_test_registry();
        let context = DataContext::new().with("count", 3);
        assert_eq!(
            registry.render("reminder", &context).unwrap(),
            "You have 3 new messages"
        );
    }

    #[test]
    fn test_render_with_overrides() {
        let registry = create_test_registry();
        let output = registry
            .render_with(
                "welcome",
                &DataContext::new(),
                &ConfigOverride::new().keep_invalid(true),
            )
            .unwrap();
        assert_eq!(output, "Welcome, {user.name}!");
    }

    #[test]
    fn test_render_unknown_fails() {
        let registry = create_test_registry();
        let err = registry.render("nope", &DataContext::new()).unwrap_err();
        assert_eq!(err, ApplicationError::TemplateNotFound("nope".to_string()));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_validate_registered() {
        let registry = create_test_registry();
        let result = registry.validate("welcome", &DataContext::new()).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["user.name"]);
    }

    #[test]
    fn test_validate_unknown_fails() {
        let registry = TemplateRegistry::new();
        assert!(matches!(
            registry.validate("nope", &DataContext::new()),
            Err(ApplicationError::TemplateNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_preview_uses_engine_decoration() {
        let registry = TemplateRegistry::with_config(
            TemplateConfig::new().with_invalid_format(InvalidFormat::new("<", ">")),
        );
        registry.register("t", "Hi {name}");
        assert_eq!(registry.preview("t", &DataContext::new()).unwrap(), "Hi <{name}>");
        assert_eq!(registry.render("t", &DataContext::new()).unwrap(), "Hi ");
    }

    #[test]
    fn test_concurrent_access() {
        let registry = Arc::new(TemplateRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let id = format!("t{i}");
                    registry.register(id.clone(), "n={n}");
                    let context = DataContext::new().with("n", i);
                    registry.render(&id, &context).unwrap()
                })
            })
            .collect();

        let mut outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        outputs.sort();
        assert_eq!(outputs.len(), 8);
        assert_eq!(outputs[0], "n=0");
        assert_eq!(registry.len(), 8);
    }
}
