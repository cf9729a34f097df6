//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
