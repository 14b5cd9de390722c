//! # Template Selection
//!
//! Picks and renders the body of a new migration file. The decision table,
//! first match wins:
//!
//! | explicit template | type | intent   | result                  |
//! |-------------------|------|----------|-------------------------|
//! | present           | any  | any      | the explicit template   |
//! | absent            | code | any      | Rust `CodeMigration` stub |
//! | absent            | sql  | create   | `CREATE TABLE` skeleton |
//! | absent            | sql  | update   | `ALTER TABLE` skeleton  |
//! | absent            | sql  | other    | generic placeholder     |
//!
//! Intent is only inferred on the SQL row without an explicit template.
//! All templates are rendered with Tera and may reference `Version`,
//! `CamelName` and `TableName`.

use quill_core::{EngineError, EngineResult, MigrationType, Version};
use std::error::Error as _;
use std::path::Path;
use tera::{Context, Tera};

use crate::naming::{CommandInference, CommandIntent, Slug};

// ============================================================================
// Built-in Bodies
// ============================================================================

const GENERIC_SQL: &str = "-- +quill Up
-- +quill StatementBegin
SELECT 'up SQL query';
-- +quill StatementEnd

-- +quill Down
-- +quill StatementBegin
SELECT 'down SQL query';
-- +quill StatementEnd
";

const CREATE_TABLE_SQL: &str = "-- +quill Up
-- +quill StatementBegin
CREATE TABLE {{ TableName }} (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT ,
    created_at TIMESTAMP NULL ,
    updated_at TIMESTAMP NULL , PRIMARY KEY (id)
);
-- +quill StatementEnd

-- +quill Down
-- +quill StatementBegin
DROP TABLE {{ TableName }};
-- +quill StatementEnd
";

const ALTER_TABLE_SQL: &str = "-- +quill Up
-- +quill StatementBegin
ALTER TABLE {{ TableName }};
-- +quill StatementEnd

-- +quill Down
-- +quill StatementBegin
ALTER TABLE {{ TableName }};
-- +quill StatementEnd
";

const CODE_STUB: &str = "//! Migration {{ Version }}

use quill::{CodeMigration, EngineResult, MigrationContext};

pub struct Migration{{ CamelName }};

impl CodeMigration for Migration{{ CamelName }} {
    fn version(&self) -> &'static str {
        \"{{ Version }}\"
    }

    fn up(&self, _ctx: &mut MigrationContext) -> EngineResult<()> {
        // This code is executed when the migration is applied.
        Ok(())
    }

    fn down(&self, _ctx: &mut MigrationContext) -> EngineResult<()> {
        // This code is executed when the migration is rolled back.
        Ok(())
    }
}
";

// ============================================================================
// Template
// ============================================================================

/// A caller-supplied Tera template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    /// Create a template from its source text
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Load a template from disk, named after its file name
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EngineError::TemplateLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

// ============================================================================
// TemplateVars
// ============================================================================

/// Values available to templates during rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub version: Version,
    pub camel_name: String,
    pub table_name: Option<String>,
}

impl TemplateVars {
    pub fn new(version: Version, camel_name: impl Into<String>) -> Self {
        Self {
            version,
            camel_name: camel_name.into(),
            table_name: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    /// `TableName` is only defined when a table was inferred, so templates
    /// referring to it fail loudly otherwise.
    fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("Version", self.version.as_str());
        context.insert("CamelName", &self.camel_name);
        if let Some(table) = &self.table_name {
            context.insert("TableName", table);
        }
        context
    }
}

// ============================================================================
// TemplateKind
// ============================================================================

/// The template chosen for a new migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    Explicit(Template),
    CodeStub,
    CreateTable { table: String },
    AlterTable { table: String },
    GenericPlaceholder,
}

impl TemplateKind {
    /// Apply the decision table.
    ///
    /// A SQL name whose intent is `create` or `update` must carry a table
    /// fragment; otherwise this fails with `MalformedName`. Names with any
    /// other intent fall back to the generic placeholder even when they
    /// have no second token.
    pub fn select(
        migration_type: MigrationType,
        explicit: Option<Template>,
        slug: &Slug,
    ) -> EngineResult<Self> {
        if let Some(template) = explicit {
            return Ok(TemplateKind::Explicit(template));
        }

        let kind = match migration_type {
            MigrationType::Code => TemplateKind::CodeStub,
            MigrationType::Sql => {
                let inference = CommandInference::from_slug(slug);
                if !inference.intent.needs_table() {
                    TemplateKind::GenericPlaceholder
                } else {
                    let table = inference.require_table(slug)?.to_string();
                    match inference.intent {
                        CommandIntent::Create => TemplateKind::CreateTable { table },
                        _ => TemplateKind::AlterTable { table },
                    }
                }
            }
        };

        tracing::debug!(slug = %slug, template = kind.name(), "selected template");
        Ok(kind)
    }

    /// Name used in log lines and render errors
    pub fn name(&self) -> &str {
        match self {
            TemplateKind::Explicit(t) => t.name(),
            TemplateKind::CodeStub => "code_stub.rs",
            TemplateKind::CreateTable { .. } => "create_table.sql",
            TemplateKind::AlterTable { .. } => "alter_table.sql",
            TemplateKind::GenericPlaceholder => "generic.sql",
        }
    }

    /// Tera source of the template
    pub fn source(&self) -> &str {
        match self {
            TemplateKind::Explicit(t) => t.source(),
            TemplateKind::CodeStub => CODE_STUB,
            TemplateKind::CreateTable { .. } => CREATE_TABLE_SQL,
            TemplateKind::AlterTable { .. } => ALTER_TABLE_SQL,
            TemplateKind::GenericPlaceholder => GENERIC_SQL,
        }
    }

    /// Table inferred during selection, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            TemplateKind::CreateTable { table } | TemplateKind::AlterTable { table } => {
                Some(table)
            }
            _ => None,
        }
    }

    /// Render the template with `vars`.
    ///
    /// The table chosen during selection wins over `vars.table_name`.
    pub fn render(&self, vars: &TemplateVars) -> EngineResult<String> {
        let name = self.name();
        let mut context = vars.to_context();
        if let Some(table) = self.table() {
            context.insert("TableName", table);
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, self.source())
            .map_err(|e| EngineError::template_render(name, error_chain(&e)))?;

        tera.render(name, &context)
            .map_err(|e| EngineError::template_render(name, error_chain(&e)))
    }
}

/// Tera puts the useful detail in the error's sources
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ============================================================================
// Tests
// ============================================================================
