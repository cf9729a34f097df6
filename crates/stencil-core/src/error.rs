//! The crate-wide error type.
//!
//! Each layer keeps its own error enum; [`StencilError`] wraps them so
//! services and adapters can use `?` across layers, and exposes one
//! [`ErrorCategory`] the CLI maps to exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::engine::RenderError;

pub type StencilResult<T> = Result<T, StencilError>;

#[derive(Debug, Error)]
pub enum StencilError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Setup the user can fix, such as a missing templates directory.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Broken invariant inside stencil itself.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

/// Coarse classification shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

impl StencilError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Render(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => {
                vec!["Check templates.dir in your config or the --templates flag".into()]
            }
            Self::Internal { .. } => vec!["Re-run with -vv and include the log in a bug report".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Render(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_follow_the_wrapped_error() {
        let domain: StencilError = DomainError::DuplicateField { field: "id".into() }.into();
        assert_eq!(domain.category(), ErrorCategory::Validation);

        let render: StencilError = RenderError::TemplateNotFound {
            name: "x".into(),
            available: vec![],
        }
        .into();
        assert_eq!(render.category(), ErrorCategory::NotFound);

        let app: StencilError = ApplicationError::FileExists {
            path: PathBuf::from("out/user.types.ts"),
        }
        .into();
        assert_eq!(app.category(), ErrorCategory::Validation);

        let config = StencilError::Configuration {
            message: "templates directory not found".into(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn display_prefixes_the_layer() {
        let err: StencilError = DomainError::UnknownFieldType { found: "uuid".into() }.into();
        assert_eq!(err.to_string(), "Domain error: Unknown field type 'uuid'");
    }

    #[test]
    fn every_error_has_a_suggestion() {
        let errors: Vec<StencilError> = vec![
            DomainError::InvalidTemplate("x".into()).into(),
            ApplicationError::ValidationFailed("x".into()).into(),
            StencilError::Configuration { message: "x".into() },
            StencilError::Internal { message: "x".into() },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err}");
        }
    }
}
