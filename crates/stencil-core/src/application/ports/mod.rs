//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `stencil-adapters` implement these.
//!
//! - `Filesystem`: file operations for generated output
//! - `TemplateSource`: built-in or on-disk template sets

pub mod output;

pub use output::{Filesystem, TemplateSource};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateSource};
