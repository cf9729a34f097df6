//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STENCIL_*` environment variables, `__` between section and key
//!    (`STENCIL_GENERATE__OUTPUT_DIR=src/gen`)
//! 3. Config file: `--config FILE`, else `./.stencil.toml`, else the user
//!    config path from [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stencil_adapters::BUILTIN_NAMES;

/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = ".stencil.toml";

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where templates come from.
    pub templates: TemplateConfig,
    /// Defaults for `stencil generate`.
    pub generate: GenerateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of user templates; loaded after the built-ins.
    pub dir: Option<PathBuf>,
    pub include_builtin: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: None,
            include_builtin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub output_dir: PathBuf,
    pub templates: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            templates: BUILTIN_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Default `list` format: table, list, json or csv.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "table".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`.  An explicit file
    /// must exist; the implicit locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                debug!(path = %path.display(), "using explicit config file");
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::discover() {
                    debug!(path = %path.display(), "using discovered config file");
                    builder = builder
                        .add_source(File::from(path.as_path()).format(FileFormat::Toml));
                }
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("generate.templates"),
            )
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// First existing file among the implicit locations.
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let user = Self::config_path();
        user.is_file().then_some(user)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Serialise as TOML, the format `init` writes.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Look up a dotted key such as `generate.output_dir`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "templates.dir" => self
                .templates
                .dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            "templates.include_builtin" => self.templates.include_builtin.to_string(),
            "generate.output_dir" => self.generate.output_dir.display().to_string(),
            "generate.templates" => self.generate.templates.join(","),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Keys accepted by [`AppConfig::get`].
    pub const KEYS: [&'static str; 6] = [
        "templates.dir",
        "templates.include_builtin",
        "generate.output_dir",
        "generate.templates",
        "output.no_color",
        "output.format",
    ];
}
