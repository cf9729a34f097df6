//! Filesystem-based template loader.
//!
//! Reads a directory of template files, optionally described by a
//! `stencil.toml` manifest, and turns them into domain [`Template`] records.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── stencil.toml          ← manifest (optional)
//! ├── api-client.txt        ← listed in the manifest
//! ├── user.card.tsx.tpl     ← auto-discovered: name `user.card`, ext `tsx`
//! └── notes.tpl             ← auto-discovered: name `notes`, ext `txt`
//! ```
//!
//! # `stencil.toml` format
//!
//! ```toml
//! [[templates]]
//! name      = "client"
//! file      = "api-client.txt"
//! extension = "ts"            # optional; inferred from `file` when omitted
//! ```
//!
//! Every `*.tpl` file under the directory that the manifest does not list is
//! picked up as well. A missing directory or a malformed manifest fails the
//! whole load; unreadable individual files are skipped with a warning.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::Template,
    error::{StencilError, StencilResult},
};

/// Manifest file name looked up in the templates directory.
pub const MANIFEST_FILE: &str = "stencil.toml";

/// Suffix that marks a file as an auto-discovered template.
pub const TEMPLATE_SUFFIX: &str = ".tpl";

const DEFAULT_EXTENSION: &str = "txt";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `stencil.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplateManifest {
    #[serde(default)]
    pub templates: Vec<ManifestEntry>,
}

/// One entry under `[[templates]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ManifestEntry {
    pub name: String,
    /// Path relative to the templates directory.
    pub file: PathBuf,
    pub extension: Option<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] records from a directory.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::FilesystemTemplateLoader;
/// use stencil_core::application::ports::TemplateSource;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let templates = loader.load()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), stencil_core::error::StencilError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
    name: String,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`load`](TemplateSource::load)
    /// returns an error if it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let templates_dir = templates_dir.into();
        Self {
            name: templates_dir.display().to_string(),
            templates_dir,
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    fn source_error(&self, reason: impl Into<String>) -> StencilError {
        ApplicationError::TemplateSource {
            source_name: self.name.clone(),
            reason: reason.into(),
        }
        .into()
    }

    /// Parse `stencil.toml`, or an empty manifest when there is none.
    fn read_manifest(&self) -> StencilResult<TemplateManifest> {
        let manifest_path = self.templates_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            debug!(path = %manifest_path.display(), "no manifest, auto-discovery only");
            return Ok(TemplateManifest::default());
        }

        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            self.source_error(format!("failed to read '{}': {e}", manifest_path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            self.source_error(format!("failed to parse '{}': {e}", manifest_path.display()))
        })
    }

    fn load_manifest_entries(&self, manifest: &TemplateManifest, out: &mut Vec<Template>) {
        for entry in &manifest.templates {
            let path = self.templates_dir.join(&entry.file);
            let body = match fs::read_to_string(&path) {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        template = %entry.name,
                        path = %path.display(),
                        error = %e,
                        "skipping manifest entry: file unreadable"
                    );
                    continue;
                }
            };
            let extension = match &entry.extension {
                Some(ext) => ext.clone(),
                None => extension_of(&entry.file),
            };
            push_valid(out, Template::new(&entry.name, body, extension), &path);
        }
    }

    fn discover(&self, listed: &[PathBuf], out: &mut Vec<Template>) {
        let walker = WalkDir::new(&self.templates_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    None
                }
            });

        for entry in walker {
            let path = entry.path();
            if !entry.file_type().is_file() || listed.iter().any(|l| l == path) {
                continue;
            }
            let Some((name, extension)) = entry.file_name().to_str().and_then(split_template_name)
            else {
                continue;
            };

            match fs::read_to_string(path) {
                Ok(body) => push_valid(out, Template::new(name, body, extension), path),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable template"),
            }
        }
    }
}

impl TemplateSource for FilesystemTemplateLoader {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    fn load(&self) -> StencilResult<Vec<Template>> {
        if !self.templates_dir.is_dir() {
            return Err(self.source_error(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let manifest = self.read_manifest()?;
        let listed: Vec<PathBuf> = manifest
            .templates
            .iter()
            .map(|e| self.templates_dir.join(&e.file))
            .collect();

        let mut templates = Vec::new();
        self.load_manifest_entries(&manifest, &mut templates);
        self.discover(&listed, &mut templates);

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }
}

fn push_valid(out: &mut Vec<Template>, template: Template, path: &Path) {
    match template.validate() {
        Ok(()) => {
            debug!(template = %template, "loaded template");
            out.push(template);
        }
        Err(e) => warn!(path = %path.display(), error = %e, "skipping invalid template"),
    }
}

/// `user.card.tsx.tpl` → `("user.card", "tsx")`, `card.tpl` → `("card", "txt")`.
fn split_template_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(TEMPLATE_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(match stem.rsplit_once('.') {
        Some((name, ext)) if !name.is_empty() && !ext.is_empty() => (name, ext),
        _ => (stem, DEFAULT_EXTENSION),
    })
}

/// Extension for a manifest entry without an explicit one.
fn extension_of(file: &Path) -> String {
    let file_name = file.file_name().and_then(|n| n.to_str());
    if let Some((_, ext)) = file_name.and_then(split_template_name) {
        return ext.to_string();
    }
    file.extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_EXTENSION)
        .to_string()
}
