//! Template records and render results.
//!
//! A [`Template`] is the unit the engine's store keeps: a name, the raw
//! directive-bearing body and the extension of the file it produces. Templates
//! are immutable once built; registering the same name again replaces the
//! previous record.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// A named template body.
///
/// ## Extension normalisation
///
/// Extensions are stored without a leading dot, so `".tsx"` and `"tsx"` name
/// the same output type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    body: String,
    extension: String,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        body: impl Into<String>,
        extension: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            extension: extension.as_ref().trim_start_matches('.').to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Number of lines in the body (reported by `list`).
    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Check that the record can be registered and written out.
    ///
    /// The engine itself accepts any name; loaders call this before handing
    /// records over so that broken manifests are reported early.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "template name cannot be empty".into(),
            ));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidTemplate(format!(
                "template name '{}' contains whitespace",
                self.name
            )));
        }
        if self
            .extension
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(DomainError::InvalidTemplate(format!(
                "extension '{}' of template '{}' is not a plain file extension",
                self.extension, self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Template {
    /// Display as `name (.ext)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (.{})", self.name, self.extension)
    }
}

/// Output of one render call. Built fresh every time, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub content: String,
    pub extension: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_loses_leading_dot() {
        let t = Template::new("types", "", ".ts");
        assert_eq!(t.extension(), "ts");
        assert_eq!(Template::new("types", "", "ts"), t);
    }

    #[test]
    fn validate_rejects_empty_name() {
        assert!(Template::new("  ", "body", "ts").validate().is_err());
    }

    #[test]
    fn validate_rejects_path_like_extension() {
        assert!(Template::new("list", "body", "ts/x").validate().is_err());
    }

    #[test]
    fn display_shows_name_and_extension() {
        assert_eq!(Template::new("form", "", "tsx").to_string(), "form (.tsx)");
    }

    #[test]
    fn line_count_counts_body_lines() {
        assert_eq!(Template::new("a", "one\ntwo\nthree\n", "txt").line_count(), 3);
    }
}
