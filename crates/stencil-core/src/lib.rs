//! Stencil Core - template engine and code generation
//!
//! This crate provides the domain types, the directive-based template
//! engine and the application services of the Stencil CRUD boilerplate
//! generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, TemplateService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌──────────────────────┐  ┌───────────────────────────┐
//! │ Engine               │  │ Ports (Filesystem,        │
//! │ (store, helpers,     │  │  TemplateSource)          │
//! │  4-stage pipeline)   │  └─────────────┬─────────────┘
//! └──────────────────────┘                │ implemented by
//!                                         ▼
//!                           ┌───────────────────────────┐
//!                           │ stencil-adapters          │
//!                           └───────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use stencil_core::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.register_template(
//!     "types",
//!     "export interface {{modelName}} {\n{{#each fields}}  {{name}}: {{tsType}};\n{{/each}}}\n",
//!     "ts",
//! );
//!
//! let model = Model::new("user-profile", vec![FieldSpec::new("email", FieldType::Email)]);
//! let out = engine.render("types", &model.to_context()).unwrap();
//! assert_eq!(out.content, "export interface UserProfile {\n  email: string;\n}\n");
//! ```

pub mod application;
pub mod domain;
pub mod engine;
pub mod error;

/// The types most callers need.
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, GenerateService, GenerationReport, TemplateInfo, TemplateService,
        ports::{Filesystem, TemplateSource},
    };
    pub use crate::domain::{FieldSpec, FieldType, Model, RenderResult, Template};
    pub use crate::engine::{Engine, HelperError, RenderError};
    pub use crate::error::{StencilError, StencilResult};
}
