//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> StencilResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write_file(path, content)?;
        Ok(self)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let Ok(inner) = self.read() else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) -> StencilResult<()> {
        let mut inner = self.write()?;
        inner.files.clear();
        inner.directories.clear();
        Ok(())
    }

    fn read(&self) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> StencilError {
    StencilError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn not_found(path: &Path) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write()?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> StencilResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .is_ok_and(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("out/a.ts"), "x").is_err());

        fs.create_dir_all(Path::new("out")).unwrap();
        fs.write_file(Path::new("out/a.ts"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("out/a.ts")).unwrap(), "x");
        assert!(fs.exists(Path::new("out")));
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new().with_file("out/b.ts", "b").unwrap();
        let other = fs.clone();
        other.remove_file(Path::new("out/b.ts")).unwrap();

        assert!(fs.list_files().is_empty());
        assert!(fs.remove_file(Path::new("out/b.ts")).is_err());
    }

    #[test]
    fn list_files_is_sorted() {
        let fs = MemoryFilesystem::new()
            .with_file("z.txt", "")
            .unwrap()
            .with_file("a/b.txt", "")
            .unwrap();
        assert_eq!(
            fs.list_files(),
            vec![PathBuf::from("a/b.txt"), PathBuf::from("z.txt")]
        );
        fs.clear().unwrap();
        assert!(fs.list_files().is_empty());
    }
}
