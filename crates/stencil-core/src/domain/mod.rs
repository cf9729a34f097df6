//! Core domain layer for Stencil.
//!
//! Pure logic with no I/O: template records, CRUD model descriptions, case
//! conversion and the value rules (truthiness, text coercion) the engine
//! applies to context data.
pub mod case;
pub mod error;
pub mod model;
pub mod template;
pub mod value;

pub use error::DomainError;
pub use model::{FieldSpec, FieldType, Model};
pub use template::{RenderResult, Template};
