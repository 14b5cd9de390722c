//! # Quill Core
//!
//! Core types, traits, and error handling for Quill.
//!
//! This crate provides the foundational building blocks shared by the
//! catalog, code generation, and CLI crates:
//!
//! - **Types**: `MigrationType`, `VersionMode`, and the `Version` identifier
//! - **Traits**: `CodeMigration`, implemented by generated Rust migration stubs
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult, ResultExt};
pub use traits::{CodeMigration, MigrationContext};
pub use types::{
    DEFAULT_SEQUENTIAL_WIDTH, MigrationType, TIMESTAMP_FORMAT, TIMESTAMP_VERSION_FLOOR, Version,
    VersionMode,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
