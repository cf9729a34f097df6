//! Template Service - template management operations.
//!
//! Installs templates from sources into an engine and answers metadata
//! queries. Separated from GenerateService for single responsibility.

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::TemplateSource},
    engine::Engine,
    error::{StencilError, StencilResult},
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub extension: String,
    pub lines: usize,
}

/// Service for template operations.
#[derive(Debug, Default)]
pub struct TemplateService {
    engine: Engine,
}

impl TemplateService {
    /// Create a new template service around an engine.
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Register every template of `source`, replacing same-named ones.
    ///
    /// Returns how many templates were installed.
    #[instrument(skip_all, fields(source = source.name()))]
    pub fn install(&mut self, source: &dyn TemplateSource) -> StencilResult<usize> {
        let templates = source.load().map_err(|e| match e {
            StencilError::Application(_) => e,
            other => ApplicationError::TemplateSource {
                source_name: source.name().to_string(),
                reason: other.to_string(),
            }
            .into(),
        })?;

        let count = templates.len();
        for template in templates {
            template.validate()?;
            self.engine.insert_template(template);
        }
        info!(count, source = source.name(), "Templates installed");
        Ok(count)
    }

    /// List all templates, sorted by name.
    pub fn list(&self) -> Vec<TemplateInfo> {
        self.engine
            .templates()
            .iter()
            .map(|t| TemplateInfo {
                name: t.name().to_string(),
                extension: t.extension().to_string(),
                lines: t.line_count(),
            })
            .collect()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Hand the configured engine to a renderer or generator.
    pub fn into_engine(self) -> Engine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateSource;
    use crate::domain::{DomainError, Template};

    fn source(templates: Vec<Template>) -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source.expect_name().return_const("test".to_string());
        source
            .expect_load()
            .returning(move || Ok(templates.clone()));
        source
    }

    #[test]
    fn install_registers_and_lists_sorted() {
        let mut service = TemplateService::new(Engine::new());
        let count = service
            .install(&source(vec![
                Template::new("types", "a\nb\n", "ts"),
                Template::new("form", "x", ".tsx"),
            ]))
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            service.list(),
            vec![
                TemplateInfo { name: "form".into(), extension: "tsx".into(), lines: 1 },
                TemplateInfo { name: "types".into(), extension: "ts".into(), lines: 2 },
            ]
        );
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let mut service = TemplateService::default();
        service.install(&source(vec![Template::new("list", "old", "tsx")])).unwrap();
        service.install(&source(vec![Template::new("list", "new", "tsx")])).unwrap();

        let engine = service.into_engine();
        assert_eq!(engine.templates().get("list").unwrap().body(), "new");
    }

    #[test]
    fn invalid_template_is_rejected() {
        let mut service = TemplateService::default();
        let err = service
            .install(&source(vec![Template::new("bad name", "", "txt")]))
            .unwrap_err();
        assert!(matches!(err, StencilError::Domain(DomainError::InvalidTemplate(_))));
    }

    #[test]
    fn source_failures_name_the_source() {
        let mut failing = MockTemplateSource::new();
        failing.expect_name().return_const("disk".to_string());
        failing.expect_load().returning(|| {
            Err(StencilError::Configuration {
                message: "unreadable".into(),
            })
        });

        let err = TemplateService::default().install(&failing).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::TemplateSource { ref source_name, .. })
                if source_name == "disk"
        ));
    }
}
