//! The template rendering engine.
//!
//! Rendering runs four text-to-text stages in a fixed order:
//!
//! 1. **iteration**: `{{#each path}}..{{/each}}` blocks expand per element,
//!    each element's copy going through the whole pipeline again;
//! 2. **conditional**: `{{#if path}}..{{/if}}` blocks keep or drop their body;
//! 3. **helper**: `{{helper path}}` calls to registered helpers;
//! 4. **substitution**: plain `{{path}}` lookups.
//!
//! ```
//! use serde_json::json;
//! use stencil_core::engine::Engine;
//!
//! let mut engine = Engine::new();
//! engine.register_template("greet", "Hello {{pascalCase name}}!", "txt");
//!
//! let out = engine.render("greet", &json!({"name": "ada-lovelace"})).unwrap();
//! assert_eq!(out.content, "Hello AdaLovelace!");
//! assert_eq!(out.extension, "txt");
//! ```

mod conditional;
pub mod error;
pub mod helpers;
mod iteration;
mod scope;
mod store;
mod substitution;
mod syntax;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{RenderResult, Template};

pub use error::{HelperError, RenderError};
pub use helpers::{BuiltinHelper, Helper, HelperFn, HelperRegistry};
pub use scope::Scope;
pub use store::TemplateStore;

/// Templates, helpers and the render pipeline.
///
/// Registration takes `&mut self` and happens at configuration time;
/// rendering takes `&self`, so a configured engine can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Engine {
    templates: TemplateStore,
    helpers: HelperRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the built-in helpers and no templates.
    pub fn new() -> Self {
        Self {
            templates: TemplateStore::new(),
            helpers: HelperRegistry::with_builtins(),
        }
    }

    /// Engine with no helpers at all.
    pub fn bare() -> Self {
        Self {
            templates: TemplateStore::new(),
            helpers: HelperRegistry::new(),
        }
    }

    pub fn register_template(&mut self, name: &str, body: &str, extension: &str) {
        debug!(template = name, "registering template");
        self.templates.register(name, body, extension);
    }

    pub fn insert_template(&mut self, template: Template) {
        debug!(template = template.name(), "registering template");
        self.templates.insert(template);
    }

    pub fn register_helper<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&Value) -> Result<String, HelperError> + Send + Sync + 'static,
    {
        debug!(helper = name, "registering helper");
        self.helpers.register(name, Helper::Custom(Arc::new(f)));
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn clear_templates(&mut self) {
        self.templates.clear();
    }

    /// Render a registered template against `context`.
    ///
    /// # Errors
    ///
    /// [`RenderError::TemplateNotFound`] when `name` is not registered, and
    /// [`RenderError::Helper`] when a helper call fails.
    #[instrument(skip(self, context))]
    pub fn render(&self, name: &str, context: &Value) -> Result<RenderResult, RenderError> {
        let template = self.templates.get(name)?;
        let content = pipeline(template.body(), &Scope::root(context), &self.helpers)?;
        debug!(bytes = content.len(), "rendered");
        Ok(RenderResult {
            content,
            extension: template.extension().to_string(),
        })
    }

    /// Run the pipeline over an anonymous body.
    pub fn render_str(&self, body: &str, context: &Value) -> Result<String, RenderError> {
        pipeline(body, &Scope::root(context), &self.helpers)
    }
}

/// The four stages, in order, over one fragment.
pub(crate) fn pipeline(
    src: &str,
    scope: &Scope<'_>,
    registry: &HelperRegistry,
) -> Result<String, RenderError> {
    let expanded = iteration::expand(src, scope, registry)?;
    let evaluated = conditional::evaluate(&expanded, scope);
    let applied = helpers::apply(&evaluated, scope, registry)?;
    Ok(substitution::substitute(&applied, scope))
}
