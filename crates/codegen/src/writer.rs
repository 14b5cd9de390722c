//! # Artifact Writing
//!
//! Composes `<dir>/<version>_<slug>.<ext>`, refuses to touch an existing
//! file, and writes the rendered template into a new one.
//!
//! An existing path is reported as `AlreadyExists` before anything else,
//! even when the template would fail to render. The template is then
//! rendered before the file is opened, so a render failure never leaves a
//! file behind. The file is opened with `create_new`, which closes the gap
//! between the check and the creation; a write failure removes the
//! half-written file.

use quill_core::{EngineError, EngineResult, MigrationType, Version};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::naming::Slug;
use crate::templates::{TemplateKind, TemplateVars};

/// Path of the migration file for `version` and `slug`
pub fn migration_path(
    dir: &Path,
    version: &Version,
    slug: &Slug,
    migration_type: MigrationType,
) -> PathBuf {
    dir.join(format!("{}_{}.{}", version, slug, migration_type.extension()))
}

/// Render `template` with `vars` into a new migration file.
///
/// # Errors
///
/// - [`EngineError::AlreadyExists`] if the target path is taken
/// - [`EngineError::TemplateRender`] if rendering fails (no file is created)
/// - [`EngineError::FileWrite`] for any other filesystem failure
pub fn write_artifact(
    dir: &Path,
    version: &Version,
    slug: &Slug,
    migration_type: MigrationType,
    template: &TemplateKind,
    vars: &TemplateVars,
) -> EngineResult<PathBuf> {
    let path = migration_path(dir, version, slug, migration_type);
    if path.exists() {
        return Err(EngineError::AlreadyExists(path));
    }

    let content = template.render(vars)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => EngineError::AlreadyExists(path.clone()),
            _ => EngineError::FileWrite {
                path: path.clone(),
                message: e.to_string(),
            },
        })?;

    if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.flush()) {
        drop(file);
        if let Err(cleanup) = std::fs::remove_file(&path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "failed to remove partial migration file"
            );
        }
        return Err(EngineError::FileWrite {
            path,
            message: e.to_string(),
        });
    }

    tracing::info!(
        path = %path.display(),
        template = template.name(),
        "created new migration file"
    );
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Template;
    use std::fs;
    use tempfile::TempDir;

    fn vars() -> TemplateVars {
        TemplateVars::new(Version::sequential(1, 5), "AddUsersTable")
    }

    #[test]
    fn test_migration_path() {
        let slug = Slug::new("add users table").unwrap();
        let path = migration_path(
            Path::new("migrations"),
            &Version::sequential(1, 5),
            &slug,
            MigrationType::Sql,
        );
        assert_eq!(path, PathBuf::from("migrations/00001_add_users_table.sql"));

        let path = migration_path(
            Path::new("db"),
            &Version::sequential(12, 5),
            &Slug::new("AddIndex").unwrap(),
            MigrationType::Code,
        );
        assert_eq!(path, PathBuf::from("db/00012_add_index.rs"));
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let slug = Slug::new("create_orders").unwrap();
        let kind = TemplateKind::CreateTable { table: "orders".into() };

        let path = write_artifact(
            dir.path(),
            &Version::sequential(1, 5),
            &slug,
            MigrationType::Sql,
            &kind,
            &vars(),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, kind.render(&vars()).unwrap());
    }

    #[test]
    fn test_existing_file_is_not_modified() {
        let dir = TempDir::new().unwrap();
        let slug = Slug::new("init").unwrap();
        let existing = dir.path().join("00001_init.sql");
        fs::write(&existing, "-- hand written\n").unwrap();

        let err = write_artifact(
            dir.path(),
            &Version::sequential(1, 5),
            &slug,
            MigrationType::Sql,
            &TemplateKind::GenericPlaceholder,
            &vars(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::AlreadyExists(ref p) if p == &existing));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "-- hand written\n");
    }

    #[test]
    fn test_render_failure_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let slug = Slug::new("seed").unwrap();
        let kind = TemplateKind::Explicit(Template::new("seed.sql", "{{ Missing }}"));

        let err = write_artifact(
            dir.path(),
            &Version::sequential(1, 5),
            &slug,
            MigrationType::Sql,
            &kind,
            &vars(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::TemplateRender { .. }));
        assert!(!dir.path().join("00001_seed.sql").exists());
    }

    #[test]
    fn test_existing_file_wins_over_render_failure() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("00001_seed.sql");
        fs::write(&existing, "-- seeded by hand\n").unwrap();
        let kind = TemplateKind::Explicit(Template::new("seed.sql", "{{ Missing }}"));

        let err = write_artifact(
            dir.path(),
            &Version::sequential(1, 5),
            &Slug::new("seed").unwrap(),
            MigrationType::Sql,
            &kind,
            &vars(),
        )
        .unwrap_err();

        assert!(err.is_collision());
        assert!(matches!(err, EngineError::AlreadyExists(ref p) if p == &existing));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "-- seeded by hand\n");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = write_artifact(
            &dir.path().join("missing"),
            &Version::sequential(1, 5),
            &Slug::new("init").unwrap(),
            MigrationType::Sql,
            &TemplateKind::GenericPlaceholder,
            &vars(),
        )
        .unwrap_err();

        assert!(err.is_io());
    }
}
