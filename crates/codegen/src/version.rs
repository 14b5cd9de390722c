//! # Version Allocation
//!
//! Produces the version for a new migration under one of two schemes:
//!
//! - **Timestamp**: the current local time as `YYYYMMDDHHMMSS`. No I/O.
//!   Two calls within the same second return the same version; the writer's
//!   collision check catches the clash.
//! - **Sequential**: one more than the highest sequential version in the
//!   migrations directory, or `1` when there is none. The directory is
//!   re-scanned on every call so manual renames and deletions are honoured.
//!
//! Timestamp-numbered files are ignored by the sequential scheme; a
//! directory containing only timestamped migrations starts again at `1`.

use chrono::{DateTime, Local, TimeZone};
use quill_catalog::collect_migrations;
use quill_core::{DEFAULT_SEQUENTIAL_WIDTH, EngineError, EngineResult, Version, VersionMode};
use std::fmt;
use std::path::Path;

use crate::CreatorConfig;

// ============================================================================
// VersionAllocator
// ============================================================================

/// Allocates versions for new migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionAllocator {
    mode: VersionMode,
    sequential_width: usize,
    min_version: i64,
    max_version: i64,
}

impl VersionAllocator {
    /// Allocator for `mode` with default width and an unbounded scan
    pub fn new(mode: VersionMode) -> Self {
        Self {
            mode,
            sequential_width: DEFAULT_SEQUENTIAL_WIDTH,
            min_version: quill_catalog::MIN_VERSION,
            max_version: quill_catalog::MAX_VERSION,
        }
    }

    /// Allocator matching a creator configuration
    pub fn from_config(config: &CreatorConfig) -> Self {
        Self {
            mode: config.version_mode,
            sequential_width: config.sequential_width,
            min_version: config.min_version,
            max_version: config.max_version,
        }
    }

    /// Allocate the next version for `dir` using the current local time
    pub fn allocate(&self, dir: &Path) -> EngineResult<Version> {
        self.allocate_at(dir, &Local::now())
    }

    /// Allocate the next version for `dir`, using `now` in timestamp mode
    pub fn allocate_at<Tz>(&self, dir: &Path, now: &DateTime<Tz>) -> EngineResult<Version>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let version = match self.mode {
            VersionMode::Timestamp => Version::from_timestamp(now),
            VersionMode::Sequential => self.next_sequential(dir)?,
        };

        tracing::debug!(mode = %self.mode, version = %version, "allocated version");
        Ok(version)
    }

    fn next_sequential(&self, dir: &Path) -> EngineResult<Version> {
        let migrations = collect_migrations(dir, self.min_version, self.max_version)?;

        let next = match migrations.versioned().last() {
            Some(last) => last.version.checked_add(1).ok_or_else(|| {
                let message = format!("version {} cannot be incremented", last.version);
                EngineError::allocation(dir, message)
            })?,
            None => 1,
        };

        Ok(Version::sequential(next, self.sequential_width))
    }
}

/// Allocate a version for `dir` under `mode` with default settings
pub fn allocate(mode: VersionMode, dir: impl AsRef<Path>) -> EngineResult<Version> {
    VersionAllocator::new(mode).allocate(dir.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "").unwrap();
    }

    #[test]
    fn test_sequential_empty_directory_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let version = allocate(VersionMode::Sequential, dir.path()).unwrap();
        assert_eq!(version.as_str(), "00001");
    }

    #[test]
    fn test_sequential_takes_max_plus_one() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00003_c.sql");
        touch(&dir, "00007_g.sql");
        touch(&dir, "00002_b.rs");

        let version = allocate(VersionMode::Sequential, dir.path()).unwrap();
        assert_eq!(version.as_str(), "00008");
        assert_eq!(version.number(), Some(8));
    }

    #[test]
    fn test_sequential_ignores_timestamped_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "20240101120000_ts.sql");
        assert_eq!(
            allocate(VersionMode::Sequential, dir.path()).unwrap().as_str(),
            "00001"
        );

        touch(&dir, "00004_seq.sql");
        assert_eq!(
            allocate(VersionMode::Sequential, dir.path()).unwrap().as_str(),
            "00005"
        );
    }

    #[test]
    fn test_sequential_rescans_every_call() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00001_a.sql");
        touch(&dir, "00002_b.sql");
        let allocator = VersionAllocator::new(VersionMode::Sequential);
        assert_eq!(allocator.allocate(dir.path()).unwrap().as_str(), "00003");

        fs::remove_file(dir.path().join("00002_b.sql")).unwrap();
        assert_eq!(allocator.allocate(dir.path()).unwrap().as_str(), "00002");
    }

    #[test]
    fn test_sequential_custom_width() {
        let dir = TempDir::new().unwrap();
        let config = CreatorConfig::new().sequential().with_sequential_width(0);
        let version = VersionAllocator::from_config(&config)
            .allocate(dir.path())
            .unwrap();
        assert_eq!(version.as_str(), "1");
    }

    #[test]
    fn test_sequential_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = allocate(VersionMode::Sequential, dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EngineError::Allocation { .. }));
    }

    #[test]
    fn test_sequential_unparseable_version_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "99999999999999999999_huge.sql");
        let err = allocate(VersionMode::Sequential, dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::Allocation { .. }));
    }

    #[test]
    fn test_timestamp_needs_no_directory() {
        let allocator = VersionAllocator::new(VersionMode::Timestamp);
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 9).unwrap();
        let version = allocator
            .allocate_at(Path::new("/definitely/not/here"), &now)
            .unwrap();
        assert_eq!(version.as_str(), "20240517134509");
    }

    #[test]
    fn test_timestamp_strictly_increases_across_seconds() {
        let allocator = VersionAllocator::new(VersionMode::Timestamp);
        let dir = Path::new(".");
        let first = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let second = first + chrono::Duration::seconds(1);

        let a = allocator.allocate_at(dir, &first).unwrap();
        let b = allocator.allocate_at(dir, &second).unwrap();
        assert!(a < b);
        assert_eq!(b.as_str(), "20250101000000");
    }

    #[test]
    fn test_timestamp_same_second_collides() {
        let allocator = VersionAllocator::new(VersionMode::Timestamp);
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = allocator.allocate_at(Path::new("."), &now).unwrap();
        let b = allocator.allocate_at(Path::new("."), &now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_timestamp_live_clock_is_14_digits() {
        let version = allocate(VersionMode::Timestamp, ".").unwrap();
        assert_eq!(version.as_str().len(), 14);
        assert!(version.as_str().bytes().all(|b| b.is_ascii_digit()));
    }
}
