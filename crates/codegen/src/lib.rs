//! # Quill Codegen
//!
//! Migration file generation for Quill.
//!
//! Given a free-form migration name and a migration type, this crate
//! allocates a version, derives a file-system safe name, picks a template
//! and writes the new file without ever overwriting an existing one.
//!
//! ## Features
//!
//! - **Version Allocation**: timestamp (`YYYYMMDDHHMMSS`) or sequential (`00001`) versions
//! - **Name Classification**: snake_case slugs, `create_*` / `update_*` intent detection
//! - **Template Selection**: explicit Tera templates or built-in SQL and Rust bodies
//! - **Artifact Writing**: collision-checked file creation with no partial output
//!

// ============================================================================
// Modules
// ============================================================================

pub mod creator;
pub mod naming;
pub mod templates;
pub mod version;
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use creator::{CreatedMigration, Creator, MigrationRequest, create, create_with_template};
pub use naming::{Classification, CommandInference, CommandIntent, Slug, camel_name, classify};
pub use templates::{Template, TemplateKind, TemplateVars};
pub use version::{VersionAllocator, allocate};
pub use writer::{migration_path, write_artifact};

use quill_core::{DEFAULT_SEQUENTIAL_WIDTH, EngineError, EngineResult, VersionMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default name of the JSON configuration file
pub const CONFIG_FILE_NAME: &str = "quill.json";

// ============================================================================
// CreatorConfig
// ============================================================================

/// Configuration for migration creation.
///
/// The version mode is fixed here for the lifetime of a [`Creator`]; there
/// is no per-call override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreatorConfig {
    /// Directory holding the migration files
    pub migrations_dir: PathBuf,

    /// Sequential or timestamp versioning
    pub version_mode: VersionMode,

    /// Lowest existing version considered when scanning
    pub min_version: i64,

    /// Highest existing version considered when scanning
    pub max_version: i64,

    /// Zero-padded width of sequential versions
    pub sequential_width: usize,

    /// Create the migrations directory when it is missing
    pub create_dir: bool,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("migrations"),
            version_mode: VersionMode::Timestamp,
            min_version: quill_catalog::MIN_VERSION,
            max_version: quill_catalog::MAX_VERSION,
            sequential_width: DEFAULT_SEQUENTIAL_WIDTH,
            create_dir: false,
        }
    }
}

impl CreatorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing keys take their default values; unknown keys are rejected.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("cannot read '{}': {}", path.display(), e))
        })?;

        let config: CreatorConfig = serde_json::from_str(&json).map_err(|e| {
            EngineError::InvalidConfig(format!("cannot parse '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for inconsistent values
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_version > self.max_version {
            return Err(EngineError::InvalidConfig(format!(
                "min_version ({}) is greater than max_version ({})",
                self.min_version, self.max_version
            )));
        }
        if self.sequential_width > 19 {
            return Err(EngineError::InvalidConfig(format!(
                "sequential_width ({}) exceeds the 19 digits of an i64",
                self.sequential_width
            )));
        }
        Ok(())
    }

    /// Set the migrations directory
    pub fn with_migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }

    /// Set the version mode
    pub fn with_version_mode(mut self, mode: VersionMode) -> Self {
        self.version_mode = mode;
        self
    }

    /// Use sequential versions
    pub fn sequential(self) -> Self {
        self.with_version_mode(VersionMode::Sequential)
    }

    /// Restrict the version range considered when scanning
    pub fn with_version_range(mut self, min: i64, max: i64) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    /// Set the zero-padded width of sequential versions
    pub fn with_sequential_width(mut self, width: usize) -> Self {
        self.sequential_width = width;
        self
    }

    /// Create the migrations directory when it is missing
    pub fn create_missing_dir(mut self) -> Self {
        self.create_dir = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
