//! # Migration Creator
//!
//! The `Creator` is the top-level entry point for creating a migration. It
//! validates the name, allocates a version, selects a template and writes
//! the file.
//!
//! ## Pipeline
//!
//! ```text
//! MigrationRequest + CreatorConfig
//!         │
//!         ▼
//!   Slug::new()                → slug (or InvalidName)
//!         │
//!         ▼
//!   VersionAllocator::allocate() → version
//!         │
//!         ▼
//!   TemplateKind::select()     → template (intent inferred for SQL only)
//!         │
//!         ▼
//!   write_artifact()           → <dir>/<version>_<slug>.<ext>
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_codegen::{Creator, CreatorConfig, MigrationRequest};
//!
//! let creator = Creator::new(CreatorConfig::new().sequential());
//! let created = creator.create(MigrationRequest::sql("create_orders"))?;
//!
//! println!("Created {}", created.path.display());
//! ```

use quill_core::{EngineError, EngineResult, MigrationType, Version};
use std::path::{Path, PathBuf};

use crate::CreatorConfig;
use crate::naming::{Slug, camel_name};
use crate::templates::{Template, TemplateKind, TemplateVars};
use crate::version::VersionAllocator;
use crate::writer::write_artifact;

// ============================================================================
// MigrationRequest
// ============================================================================

/// What the caller wants created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    pub raw_name: String,
    pub migration_type: MigrationType,
    pub explicit_template: Option<Template>,
}

impl MigrationRequest {
    pub fn new(raw_name: impl Into<String>, migration_type: MigrationType) -> Self {
        Self {
            raw_name: raw_name.into(),
            migration_type,
            explicit_template: None,
        }
    }

    /// A SQL migration request
    pub fn sql(raw_name: impl Into<String>) -> Self {
        Self::new(raw_name, MigrationType::Sql)
    }

    /// A Rust code migration request
    pub fn code(raw_name: impl Into<String>) -> Self {
        Self::new(raw_name, MigrationType::Code)
    }

    /// Render this template instead of a built-in one
    pub fn with_template(mut self, template: Template) -> Self {
        self.explicit_template = Some(template);
        self
    }
}

// ============================================================================
// CreatedMigration
// ============================================================================

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMigration {
    /// Path of the new file
    pub path: PathBuf,

    /// Allocated version
    pub version: Version,

    /// snake_case name used in the file name
    pub slug: Slug,

    /// Name of the template that was rendered
    pub template: String,
}

// ============================================================================
// Creator
// ============================================================================

/// Creates migration files according to a fixed configuration
#[derive(Debug, Clone)]
pub struct Creator {
    config: CreatorConfig,
}

impl Creator {
    /// Create a new creator with the given configuration.
    pub fn new(config: CreatorConfig) -> Self {
        Self { config }
    }

    /// Create a creator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CreatorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &CreatorConfig {
        &self.config
    }

    /// Create one migration file.
    ///
    /// The name is validated before the directory is touched. Errors are
    /// returned as-is; nothing is retried.
    pub fn create(&self, request: MigrationRequest) -> EngineResult<CreatedMigration> {
        self.config.validate()?;

        let slug = Slug::new(&request.raw_name)?;
        let dir = self.config.migrations_dir.as_path();
        self.ensure_dir(dir)?;

        let version = VersionAllocator::from_config(&self.config).allocate(dir)?;
        let template =
            TemplateKind::select(request.migration_type, request.explicit_template, &slug)?;

        let mut vars = TemplateVars::new(version.clone(), camel_name(&request.raw_name));
        if let Some(table) = template.table() {
            vars = vars.with_table(table);
        }

        let path = write_artifact(
            dir,
            &version,
            &slug,
            request.migration_type,
            &template,
            &vars,
        )?;

        Ok(CreatedMigration {
            path,
            version,
            slug,
            template: template.name().to_string(),
        })
    }

    fn ensure_dir(&self, dir: &Path) -> EngineResult<()> {
        if !self.config.create_dir || dir.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(dir).map_err(|e| EngineError::DirectoryCreate {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(dir = %dir.display(), "created migrations directory");
        Ok(())
    }
}

impl Default for Creator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Create a migration using a built-in template
pub fn create(
    config: &CreatorConfig,
    raw_name: &str,
    migration_type: MigrationType,
) -> EngineResult<CreatedMigration> {
    Creator::new(config.clone()).create(MigrationRequest::new(raw_name, migration_type))
}

/// Create a migration rendering `template`
pub fn create_with_template(
    config: &CreatorConfig,
    template: Template,
    raw_name: &str,
    migration_type: MigrationType,
) -> EngineResult<CreatedMigration> {
    Creator::new(config.clone())
        .create(MigrationRequest::new(raw_name, migration_type).with_template(template))
}

// ============================================================================
// Tests
// ============================================================================
