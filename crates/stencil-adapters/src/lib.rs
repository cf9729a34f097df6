//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod template_loader;

// Re-export commonly used adapters
pub use builtin_templates::{BUILTIN_NAMES, BuiltinTemplates};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_loader::{FilesystemTemplateLoader, MANIFEST_FILE, TEMPLATE_SUFFIX};
