//! Engine errors.
//!
//! Only two things make a render fail: asking for a template that was never
//! registered, and a helper returning an error. Everything else (missing
//! paths, unknown helpers, `each` over a non-sequence) degrades to documented
//! output instead.

use std::error::Error as StdError;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Failure reported by a helper function.
#[derive(Debug, Error)]
pub enum HelperError {
    /// The resolved argument has the wrong shape for this helper.
    #[error("{helper} expects {expected}, got {found}")]
    InvalidArgument {
        helper: String,
        expected: &'static str,
        found: String,
    },

    /// The `json` helper could not serialise its argument.
    #[error("failed to serialise value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error raised by a caller-registered helper.
    #[error(transparent)]
    Custom(Box<dyn StdError + Send + Sync>),
}

impl HelperError {
    /// Wrap any error produced by a custom helper.
    pub fn custom(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }
}

/// Errors surfaced by [`Engine::render`](crate::engine::Engine::render).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: '{name}' (available: {})", list_or_none(.available))]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("Helper '{helper}' failed: {source}")]
    Helper {
        helper: String,
        #[source]
        source: HelperError,
    },
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

impl RenderError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { available, .. } => {
                let mut out = vec!["Registered templates:".to_string()];
                if available.is_empty() {
                    out.push("  (none - check the templates directory)".into());
                }
                out.extend(available.iter().map(|name| format!("  • {}", name)));
                out.push("Try: stencil list".into());
                out
            }
            Self::Helper { helper, .. } => vec![
                format!("Check the value passed to '{}'", helper),
                "Case helpers take strings; mockValue takes a field type".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Helper { .. } => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn not_found_lists_available_names() {
        let err = RenderError::TemplateNotFound {
            name: "lst".into(),
            available: vec!["form".into(), "list".into()],
        };
        assert_eq!(
            err.to_string(),
            "Template not found: 'lst' (available: form, list)"
        );
        assert!(err.suggestions().iter().any(|s| s.contains("list")));
    }

    #[test]
    fn not_found_without_templates_says_none() {
        let err = RenderError::TemplateNotFound {
            name: "x".into(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("(available: none)"));
    }

    #[test]
    fn helper_error_keeps_source() {
        let err = RenderError::Helper {
            helper: "boom".into(),
            source: HelperError::custom("exploded"),
        };
        let source = err.source().expect("source retained");
        assert_eq!(source.to_string(), "exploded");
    }
}
