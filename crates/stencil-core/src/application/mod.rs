//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer and the engine but
//! contains no rendering logic itself.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerateRequest, GenerateService, GeneratedFile, GenerationReport, TemplateInfo,
    TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateSource};

pub use error::ApplicationError;
