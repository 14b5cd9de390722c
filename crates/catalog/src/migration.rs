//! Migration file model and file-name parsing

use quill_core::{EngineError, EngineResult, MigrationType, TIMESTAMP_VERSION_FLOOR};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// MigrationFile
// ============================================================================

/// A migration file recognized on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    /// Numeric version taken from the file-name prefix
    pub version: i64,

    /// Remainder of the file stem after the first `_`
    pub name: String,

    /// Full path to the file
    pub path: PathBuf,

    /// SQL or Rust, from the extension
    pub kind: MigrationType,
}

impl MigrationFile {
    /// Whether the version is in the timestamp range
    pub fn is_timestamped(&self) -> bool {
        self.version >= TIMESTAMP_VERSION_FLOOR
    }

    /// File name without the directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a path of the form `<digits>_<name>.<sql|rs>`.
///
/// Returns `Ok(None)` for files that do not follow the naming scheme so
/// that scans can skip them. A digit prefix too large for `i64` is an
/// allocation error, since the version exists but cannot be compared.
pub fn parse_file_name(path: &Path) -> EngineResult<Option<MigrationFile>> {
    let Some(kind) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(MigrationType::from_extension)
    else {
        return Ok(None);
    };

    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(None);
    };

    let Some((prefix, name)) = stem.split_once('_') else {
        return Ok(None);
    };

    if prefix.is_empty() || name.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    let version: i64 = prefix.parse().map_err(|e| {
        EngineError::allocation(path, format!("version '{}' is not a valid integer: {}", prefix, e))
    })?;

    if version < 1 {
        return Ok(None);
    }

    Ok(Some(MigrationFile {
        version,
        name: name.to_string(),
        path: path.to_path_buf(),
        kind,
    }))
}

// ============================================================================
// Tests
// ============================================================================
