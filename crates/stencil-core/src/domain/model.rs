//! CRUD model descriptions and the render context built from them.
//!
//! A [`Model`] is what the code generator is asked to produce boilerplate
//! for: a name plus typed fields. It validates itself and turns into the
//! plain-data context the engine renders against:
//!
//! ```text
//! {
//!   "name": "user-profile",
//!   "modelName": "UserProfile",   "modelCamel": "userProfile",
//!   "modelKebab": "user-profile", "modelSnake": "user_profile",
//!   "hasFields": true,
//!   "fields": [
//!     { "name": "email", "key": "email", "type": "email",
//!       "tsType": "string", "inputType": "email",
//!       "required": true, "optional": false, "label": "Email" }
//!   ],
//!   "mockRows": [{ "rowIndex": 0, "rowId": 1 }, ...]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{case, error::DomainError};

/// Declared type of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Email,
    Phone,
    Url,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Date,
        Self::Email,
        Self::Phone,
        Self::Url,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
        }
    }

    /// TypeScript type used in generated interfaces.
    pub fn ts_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            _ => "string",
        }
    }

    /// Event target property holding a form input's value.
    pub fn value_prop(self) -> &'static str {
        match self {
            Self::Boolean => "checked",
            _ => "value",
        }
    }

    /// HTML input type used in generated forms.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::String => "text",
            Self::Number => "number",
            Self::Boolean => "checkbox",
            Self::Date => "date",
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "string" | "str" | "text" => Ok(Self::String),
            "number" | "int" | "float" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            "email" => Ok(Self::Email),
            "phone" | "tel" => Ok(Self::Phone),
            "url" => Ok(Self::Url),
            _ => Err(DomainError::UnknownFieldType { found: s.into() }),
        }
    }
}

/// Rows produced for mock-data templates.
const MOCK_ROWS: usize = 3;

fn default_required() -> bool {
    true
}

/// One model field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut chars = self.name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            return Err(DomainError::InvalidField {
                field: self.name.clone(),
                reason: "field names must be identifiers".into(),
            });
        }
        Ok(())
    }

    fn to_context(&self) -> Value {
        json!({
            "name": self.name,
            "key": self.name,
            "type": self.field_type.as_str(),
            "tsType": self.field_type.ts_type(),
            "inputType": self.field_type.input_type(),
            "valueProp": self.field_type.value_prop(),
            "required": self.required,
            "optional": !self.required,
            "label": case::to_title_case(&self.name),
        })
    }
}

impl FromStr for FieldSpec {
    type Err = DomainError;

    /// Parse `name`, `name:type` or either form with a trailing `?`
    /// (optional field). A bare name is a string field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (spec, required) = match spec.strip_suffix('?') {
            Some(rest) => (rest, false),
            None => (spec, true),
        };

        let (name, field_type) = match spec.split_once(':') {
            Some((name, ty)) => (name.trim(), ty.parse::<FieldType>()?),
            None => (spec, FieldType::String),
        };
        let (name, required) = match name.strip_suffix('?') {
            Some(name) => (name, false),
            None => (name, required),
        };

        let field = Self {
            name: name.to_string(),
            field_type,
            required,
        };
        field.validate()?;
        Ok(field)
    }
}

/// A CRUD model: name plus fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Validate the model name and every field, rejecting duplicates.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidModelName {
                name: self.name.clone(),
                reason: "name cannot be empty".into(),
            });
        }
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidModelName {
                name: self.name.clone(),
                reason: "name must start with a letter".into(),
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidModelName {
                name: self.name.clone(),
                reason: "only letters, digits, '-' and '_' are allowed".into(),
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// File stem used for generated artefacts (`user-profile`).
    pub fn file_stem(&self) -> String {
        case::to_kebab_case(&self.name)
    }

    /// Build the render context for this model.
    pub fn to_context(&self) -> Value {
        let fields: Vec<Value> = self.fields.iter().map(FieldSpec::to_context).collect();
        let mock_rows: Vec<Value> = (0..MOCK_ROWS)
            .map(|i| json!({"rowIndex": i, "rowId": i + 1}))
            .collect();
        json!({
            "name": self.name,
            "modelName": case::to_pascal_case(&self.name),
            "modelCamel": case::to_camel_case(&self.name),
            "modelKebab": case::to_kebab_case(&self.name),
            "modelSnake": case::to_snake_case(&self.name),
            "hasFields": !fields.is_empty(),
            "fields": fields,
            "mockRows": mock_rows,
        })
    }
}
