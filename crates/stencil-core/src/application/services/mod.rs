//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the engine and the ports to
//! accomplish use cases like "install templates" or "generate a model".

pub mod generate_service;
pub mod template_service;

pub use generate_service::{GenerateRequest, GenerateService, GeneratedFile, GenerationReport};
pub use template_service::{TemplateInfo, TemplateService};
