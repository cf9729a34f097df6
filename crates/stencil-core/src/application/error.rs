//! Failures of a generation run or a template source, as opposed to bad
//! model input (`DomainError`) or a failed render (`RenderError`).

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Request-level validation (model, fields, template selection).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A target file exists and `force` was not set.
    #[error("Refusing to overwrite existing file {path}")]
    FileExists { path: PathBuf },

    /// A port call failed; `reason` is the adapter's message.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template source could not be loaded.
    #[error("Template source '{source_name}' failed: {reason}")]
    TemplateSource { source_name: String, reason: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed(reason) => vec![
                format!("Fix the request: {reason}"),
                "Run 'stencil list' to see the template names".into(),
            ],
            Self::FileExists { path } => vec![
                format!("Pass --force to replace {}", path.display()),
                "Or generate into another directory with --output".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Check that {} is writable", path.display()),
                "Files created before the failure were removed again".into(),
            ],
            Self::TemplateSource { source_name, .. } => vec![
                format!("Check the templates in '{}'", source_name),
                "A stencil.toml manifest lists [[templates]] with name, file, extension".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationFailed(_) | Self::FileExists { .. } => ErrorCategory::Validation,
            Self::TemplateSource { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
