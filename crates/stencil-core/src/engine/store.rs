//! Name-keyed template registry.

use std::collections::HashMap;

use crate::domain::Template;
use crate::engine::RenderError;

/// Templates available to an [`Engine`](crate::engine::Engine).
///
/// Re-registering a name replaces the previous template. Templates are only
/// removed in bulk by [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<String, Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, body: &str, extension: &str) {
        self.insert(Template::new(name, body, extension));
    }

    /// Store an already-built template under its own name.
    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.name().to_string(), template);
    }

    pub fn get(&self, name: &str) -> Result<&Template, RenderError> {
        self.templates
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: name.to_string(),
                available: self.list().into_iter().map(str::to_string).collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Templates in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        let mut templates: Vec<&Template> = self.templates.values().collect();
        templates.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        templates.into_iter()
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
