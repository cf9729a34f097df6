//! CLI error type, exit codes and the stderr report.
//!
//! Every failure that reaches `main` is a [`CliError`]. Its [`ErrorCategory`]
//! picks the exit code and log level; [`CliError::hints`] carries the
//! follow-up advice printed under the message.

use std::error::Error as _;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag or argument value the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// `--context` (file or stdin) is not valid JSON.
    #[error("Invalid context from {origin}: {source}")]
    InvalidContext {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Refusing to overwrite {path}")]
    OutputExists { path: PathBuf },

    /// Config file missing, unparsable or naming a bad value.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("{0}")]
    Core(#[from] StencilError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

/// How a failure is reported and which exit code it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, context or model input. Exit 2.
    Usage,
    /// Unknown template or missing resource. Exit 3.
    NotFound,
    /// Exit 4.
    Configuration,
    /// Filesystem trouble or a bug. Exit 1.
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::Usage => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation => Self::Usage,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    /// Follow-up advice shown under the error message.
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run the command with --help to see accepted values".into()],
            Self::InvalidContext { origin, .. } => vec![
                format!("Check that {origin} holds a single JSON document"),
                "Simple values can be passed with --set key=value instead".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("Pass --force to replace {}", path.display()),
                "Or write somewhere else with -o".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "User config lives at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'stencil init' to write a fresh default config".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec!["Check that the path exists and is writable".into()],
            Self::Cancelled => vec!["Nothing was written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidContext { .. }
            | Self::OutputExists { .. }
            | Self::Cancelled => ErrorCategory::Usage,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => core.category().into(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Report with ANSI styling, for a terminal stderr.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.report(verbose, &Palette::Ansi)
    }

    /// Same report without escape codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.report(verbose, &Palette::Plain)
    }

    fn report(&self, verbose: bool, palette: &Palette) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{} {self}", palette.label("Error:"));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(out, "  {} {err}", palette.dim("Caused by:"));
                cause = err.source();
            }
        }

        let hints = self.hints();
        if !hints.is_empty() {
            let _ = writeln!(out, "\n{}", palette.heading("Suggestions:"));
            for hint in &hints {
                let _ = writeln!(out, "  {hint}");
            }
        }

        if !verbose {
            let _ = writeln!(out, "\n{}", palette.dim("Use -v / --verbose for more details."));
        }
        out
    }

    /// Record the failure in the tracing log at a level matching its category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::Usage | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "command failed");
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "underlying error");
        }
    }
}

enum Palette {
    Ansi,
    Plain,
}

impl Palette {
    fn label(&self, text: &str) -> String {
        match self {
            Self::Ansi => text.red().bold().to_string(),
            Self::Plain => text.to_owned(),
        }
    }

    fn heading(&self, text: &str) -> String {
        match self {
            Self::Ansi => text.yellow().bold().to_string(),
            Self::Plain => text.to_owned(),
        }
    }

    fn dim(&self, text: &str) -> String {
        match self {
            Self::Ansi => text.dimmed().to_string(),
            Self::Plain => text.to_owned(),
        }
    }
}

/// Attach a message to a foreign error while converting it.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}
