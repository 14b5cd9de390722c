//! Core traits for Quill
//!
//! Generated Rust migration stubs implement [`CodeMigration`]. Quill never
//! runs migrations itself; a stub records the statements it wants executed
//! into a [`MigrationContext`] and the caller's runner takes it from there.

use crate::error::EngineResult;

// ============================================================================
// MigrationContext
// ============================================================================

/// Statements collected while running one direction of a code migration
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    statements: Vec<String>,
}

impl MigrationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a statement for execution
    pub fn execute(&mut self, sql: impl Into<String>) -> &mut Self {
        self.statements.push(sql.into());
        self
    }

    /// Statements queued so far, in order
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Consume the context and return its statements
    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }

    /// Whether nothing was queued
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ============================================================================
// CodeMigration Trait
// ============================================================================

/// A migration written in Rust rather than SQL.
///
/// # Example
///
/// ```rust,ignore
/// use quill::{CodeMigration, EngineResult, MigrationContext};
///
/// pub struct AddIndex;
///
/// impl CodeMigration for AddIndex {
///     fn version(&self) -> &'static str {
///         "20240101120000"
///     }
///
///     fn up(&self, ctx: &mut MigrationContext) -> EngineResult<()> {
///         ctx.execute("CREATE INDEX idx_users_email ON users (email)");
///         Ok(())
///     }
///
///     fn down(&self, ctx: &mut MigrationContext) -> EngineResult<()> {
///         ctx.execute("DROP INDEX idx_users_email");
///         Ok(())
///     }
/// }
/// ```
pub trait CodeMigration {
    /// Version this migration was created with
    fn version(&self) -> &'static str;

    /// Executed when the migration is applied
    fn up(&self, ctx: &mut MigrationContext) -> EngineResult<()>;

    /// Executed when the migration is rolled back
    fn down(&self, ctx: &mut MigrationContext) -> EngineResult<()>;
}

// ============================================================================
// Tests
// ============================================================================
