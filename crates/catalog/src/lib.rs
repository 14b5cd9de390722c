//! # Quill Catalog
//!
//! Discovery of the migration files that already exist in a directory.
//!
//! The code generation crate consults the catalog when allocating
//! sequential versions; the CLI uses it to list what is on disk.
//!
//! ## Core Concepts
//!
//! - **MigrationFile**: One recognized `<version>_<name>.<ext>` file
//! - **MigrationSet**: Version-ordered collection with `versioned()`,
//!   `timestamped()` and `last()` views
//! - **collect_migrations**: Scans a directory into a `MigrationSet`
//!

pub mod collect;
pub mod migration;
pub mod set;

pub use collect::collect_migrations;
pub use migration::{MigrationFile, parse_file_name};
pub use set::MigrationSet;

// Re-export core types that are commonly used with the catalog
pub use quill_core::{EngineError, EngineResult, MigrationType, TIMESTAMP_VERSION_FLOOR};

/// Lowest version accepted by an unbounded scan
pub const MIN_VERSION: i64 = 0;

/// Highest version accepted by an unbounded scan
pub const MAX_VERSION: i64 = i64::MAX;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
