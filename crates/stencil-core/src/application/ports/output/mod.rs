//! Driven (output) ports - implemented by infrastructure.
//!
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::Template;
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> StencilResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StencilResult<()>;
}

/// Port for anything that can hand the engine a batch of templates.
///
/// Implemented by:
/// - `stencil_adapters::builtin_templates::BuiltinTemplates`
/// - `stencil_adapters::template_loader::FilesystemTemplateLoader`
#[cfg_attr(test, automock)]
pub trait TemplateSource: Send + Sync {
    /// Human-readable source name for logs and errors.
    fn name(&self) -> &str;

    /// Load every template this source provides.
    fn load(&self) -> StencilResult<Vec<Template>>;
}
