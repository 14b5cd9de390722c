//! Directory scanning for existing migrations

use crate::migration::{MigrationFile, parse_file_name};
use crate::set::MigrationSet;
use quill_core::{EngineError, EngineResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect the migrations in `dir` whose version lies in `[min, max]`.
///
/// Only the top level of the directory is scanned. Files that do not look
/// like `<version>_<name>.<sql|rs>` are skipped. Two files with the same
/// version fail the whole scan.
///
/// # Errors
///
/// - [`EngineError::Allocation`] if the directory is missing or unreadable,
///   or a version prefix does not fit in an `i64`
/// - [`EngineError::DuplicateVersion`] if two files share a version
pub fn collect_migrations(
    dir: impl AsRef<Path>,
    min: i64,
    max: i64,
) -> EngineResult<MigrationSet> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(EngineError::allocation(dir, "migrations directory does not exist"));
    }

    let mut files: Vec<MigrationFile> = Vec::new();
    let mut seen: HashMap<i64, PathBuf> = HashMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| EngineError::allocation(dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file) = parse_file_name(entry.path())? else {
            tracing::debug!(path = %entry.path().display(), "skipping non-migration file");
            continue;
        };

        if file.version < min || file.version > max {
            continue;
        }

        if let Some(first) = seen.insert(file.version, file.path.clone()) {
            return Err(EngineError::DuplicateVersion {
                version: file.version,
                first,
                second: file.path,
            });
        }

        files.push(file);
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "collected migrations");
    Ok(MigrationSet::new(files))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_VERSION, MIN_VERSION};
    use quill_core::MigrationType;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "").unwrap();
    }

    #[test]
    fn test_collect_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00003_c.sql");
        touch(&dir, "00007_g.rs");
        touch(&dir, "00002_b.sql");

        let set = collect_migrations(dir.path(), MIN_VERSION, MAX_VERSION).unwrap();
        let versions: Vec<i64> = set.iter().map(|f| f.version).collect();
        assert_eq!(versions, vec![2, 3, 7]);
        assert_eq!(set.last().unwrap().kind, MigrationType::Code);
    }

    #[test]
    fn test_collect_skips_unrelated_entries() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00001_init.sql");
        touch(&dir, "notes.txt");
        touch(&dir, "mod.rs");
        fs::create_dir(dir.path().join("00009_nested.sql")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("00005_deep.sql"), "").unwrap();

        let set = collect_migrations(dir.path(), MIN_VERSION, MAX_VERSION).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.last().unwrap().name, "init");
    }

    #[test]
    fn test_collect_respects_bounds() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00001_a.sql");
        touch(&dir, "00002_b.sql");
        touch(&dir, "00003_c.sql");

        let set = collect_migrations(dir.path(), 2, 2).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().unwrap().version, 2);
    }

    #[test]
    fn test_collect_duplicate_versions() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00004_first.sql");
        touch(&dir, "4_second.rs");

        let err = collect_migrations(dir.path(), MIN_VERSION, MAX_VERSION).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateVersion { version: 4, .. }));
    }

    #[test]
    fn test_collect_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = collect_migrations(&missing, MIN_VERSION, MAX_VERSION).unwrap_err();
        assert!(matches!(err, EngineError::Allocation { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = TempDir::new().unwrap();
        let set = collect_migrations(dir.path(), MIN_VERSION, MAX_VERSION).unwrap();
        assert!(set.is_empty());
    }
}
