//! # Quill
//!
//! Migration file scaffolding with sequential or timestamp versioning.
//!
//! This facade re-exports the member crates. Generated Rust migration
//! stubs import [`CodeMigration`] and [`MigrationContext`] from here.
//!
//! ```rust,ignore
//! use quill::{Creator, CreatorConfig, MigrationRequest};
//!
//! let created = Creator::new(CreatorConfig::new().sequential())
//!     .create(MigrationRequest::sql("create_orders"))?;
//! ```

pub use quill_catalog;
pub use quill_codegen;
pub use quill_core;

pub use quill_catalog::{MigrationFile, MigrationSet, collect_migrations};
pub use quill_codegen::{
    CreatedMigration, Creator, CreatorConfig, MigrationRequest, Template, TemplateKind,
};
pub use quill_core::{
    CodeMigration, EngineError, EngineResult, MigrationContext, MigrationType, Version,
    VersionMode,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
