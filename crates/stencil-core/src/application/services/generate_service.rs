//! Generate Service - CRUD boilerplate generation.
//!
//! This service coordinates one generation run:
//! 1. Validate the model, its fields and the template selection
//! 2. Render every selected template against the model context
//! 3. Write the results, rolling back on a failed write

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FieldSpec, Model},
    engine::Engine,
    error::StencilResult,
};

/// Everything needed for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub fields: Vec<FieldSpec>,
    pub output_dir: PathBuf,
    /// Template names, rendered in this order.
    pub templates: Vec<String>,
    /// Overwrite existing files.
    pub force: bool,
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub template: String,
    pub path: PathBuf,
    pub content: String,
    /// Whether the target existed before this run.
    pub existed: bool,
}

/// Result of [`GenerateService::plan`] or [`GenerateService::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub model: String,
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }
}

/// Renders model templates and writes them through a [`Filesystem`].
pub struct GenerateService {
    engine: Engine,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use stencil_core::application::{GenerateService, ports::Filesystem};
    /// use stencil_core::engine::Engine;
    ///
    /// # fn demo(filesystem: Box<dyn Filesystem>) {
    /// let service = GenerateService::new(Engine::new(), filesystem);
    /// # }
    /// ```
    pub fn new(engine: Engine, filesystem: Box<dyn Filesystem>) -> Self {
        Self { engine, filesystem }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Validate and render without touching the filesystem (beyond
    /// existence checks).
    #[instrument(skip_all, fields(model = %request.model))]
    pub fn plan(&self, request: &GenerateRequest) -> StencilResult<GenerationReport> {
        let model = self.validate(request)?;
        let context = model.to_context();
        let stem = model.file_stem();

        let mut files = Vec::with_capacity(request.templates.len());
        for name in &request.templates {
            let rendered = self.engine.render(name, &context)?;
            let path = request
                .output_dir
                .join(output_file_name(&stem, name, &rendered.extension));
            debug!(template = %name, path = %path.display(), "planned");
            files.push(GeneratedFile {
                template: name.clone(),
                existed: self.filesystem.exists(&path),
                path,
                content: rendered.content,
            });
        }

        Ok(GenerationReport {
            model: model.name,
            files,
        })
    }

    /// Render and write every selected template.
    ///
    /// Nothing is written until every template rendered. If a write fails,
    /// files created by this run are removed again and the write error is
    /// returned.
    #[instrument(skip_all, fields(model = %request.model, output = %request.output_dir.display()))]
    pub fn generate(&self, request: &GenerateRequest) -> StencilResult<GenerationReport> {
        let report = self.plan(request)?;

        if !request.force {
            if let Some(existing) = report.files.iter().find(|f| f.existed) {
                return Err(ApplicationError::FileExists {
                    path: existing.path.clone(),
                }
                .into());
            }
        }

        self.filesystem.create_dir_all(&request.output_dir)?;

        let mut created: Vec<&Path> = Vec::new();
        for file in &report.files {
            if let Err(e) = self.filesystem.write_file(&file.path, &file.content) {
                warn!(path = %file.path.display(), "Write failed, attempting rollback");
                self.rollback(&created);
                return Err(e);
            }
            if !file.existed {
                created.push(&file.path);
            }
        }

        info!(files = report.files.len(), "Generation completed successfully");
        Ok(report)
    }

    fn validate(&self, request: &GenerateRequest) -> Result<Model, ApplicationError> {
        let model = Model::new(request.model.trim(), request.fields.clone());
        model
            .validate()
            .map_err(|e| ApplicationError::ValidationFailed(e.to_string()))?;

        if request.templates.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "no templates selected".into(),
            ));
        }
        let store = self.engine.templates();
        if let Some(unknown) = request.templates.iter().find(|t| !store.contains(t)) {
            return Err(ApplicationError::ValidationFailed(format!(
                "unknown template '{}' (available: {})",
                unknown,
                store.list().join(", ")
            )));
        }
        Ok(model)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, created: &[&Path]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "Rollback failed");
            }
        }
        info!(removed = created.len(), "Rollback finished");
    }
}

/// `<stem>.<template>.<ext>`, or `<stem>.<template>` without extension.
fn output_file_name(stem: &str, template: &str, extension: &str) -> String {
    if extension.is_empty() {
        format!("{stem}.{template}")
    } else {
        format!("{stem}.{template}.{extension}")
    }
}
