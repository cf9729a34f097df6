//! Invalid model, field and template records.
//!
//! Every variant is bad input from the caller, so they all report as
//! validation failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid model name '{name}': {reason}")]
    InvalidModelName { name: String, reason: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Duplicate field: {field}")]
    DuplicateField { field: String },

    #[error("Unknown field type '{found}'")]
    UnknownFieldType { found: String },
}

impl DomainError {
    /// Follow-up advice for the CLI report.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(_) => vec![
                "Template names must be non-empty and free of whitespace".into(),
                "Extensions are bare suffixes such as ts or tsx".into(),
            ],
            Self::InvalidModelName { .. } => vec![
                "Model names start with a letter".into(),
                "Use letters, digits, '-' or '_' (e.g. user-profile, Order)".into(),
            ],
            Self::InvalidField { .. } => vec![
                "Fields are written as name:type, optionally followed by '?'".into(),
                "Example: --field email:email --field age:number?".into(),
            ],
            Self::DuplicateField { field } => {
                vec![format!("Declare '{field}' once; drop the repeated --field")]
            }
            Self::UnknownFieldType { .. } => vec![
                "Supported field types: string, number, boolean, date, email, phone, url".into(),
            ],
        }
    }
}
