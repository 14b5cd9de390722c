//! Core types used throughout Quill
//!
//! This module contains the value types shared by the catalog and code
//! generation crates: the kind of migration being created, the versioning
//! scheme, and the version identifier itself.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

// ============================================================================
// Constants
// ============================================================================

/// `chrono` format of timestamp versions (`YYYYMMDDHHMMSS`, 14 digits)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Zero-padded width of sequential versions (`00001`)
pub const DEFAULT_SEQUENTIAL_WIDTH: usize = 5;

/// Smallest version treated as a timestamp rather than a sequence number
pub const TIMESTAMP_VERSION_FLOOR: i64 = 19_700_101_000_000;

// ============================================================================
// Migration Type
// ============================================================================

/// The kind of migration file to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MigrationType {
    /// Plain SQL with `-- +quill Up` / `-- +quill Down` sections
    #[default]
    Sql,
    /// Rust source stub implementing `CodeMigration`
    Code,
}

impl MigrationType {
    /// File extension used for this migration type
    pub fn extension(&self) -> &'static str {
        match self {
            MigrationType::Sql => "sql",
            MigrationType::Code => "rs",
        }
    }

    /// Resolve a file extension back to a migration type
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.extension() == ext)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MigrationType::Sql => "sql",
            MigrationType::Code => "code",
        }
    }

    /// Get all migration types
    pub fn all() -> &'static [MigrationType] {
        &[MigrationType::Sql, MigrationType::Code]
    }
}

impl fmt::Display for MigrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MigrationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(MigrationType::Sql),
            "code" | "rs" | "rust" => Ok(MigrationType::Code),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown migration type '{}' (expected 'sql' or 'rs')",
                other
            ))),
        }
    }
}

// ============================================================================
// Version Mode
// ============================================================================

/// Numbering scheme used when allocating new versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionMode {
    /// One greater than the highest sequential version on disk
    Sequential,
    /// Current local time as `YYYYMMDDHHMMSS`
    #[default]
    Timestamp,
}

impl fmt::Display for VersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionMode::Sequential => write!(f, "sequential"),
            VersionMode::Timestamp => write!(f, "timestamp"),
        }
    }
}

// ============================================================================
// Version
// ============================================================================

/// A fixed-width decimal migration version.
///
/// Versions of the same mode compare lexically in the same order as
/// numerically, so the derived `Ord` can be used directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Build a timestamp version from a point in time
    pub fn from_timestamp<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(at.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Build a sequential version zero-padded to `width` digits
    pub fn sequential(number: i64, width: usize) -> Self {
        Self(format!("{:0width$}", number, width = width))
    }

    /// The version as written in file names
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the version
    pub fn number(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Whether the version falls in the timestamp range
    pub fn is_timestamp(&self) -> bool {
        self.number().is_some_and(|n| n >= TIMESTAMP_VERSION_FLOOR)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_migration_type_extension() {
        assert_eq!(MigrationType::Sql.extension(), "sql");
        assert_eq!(MigrationType::Code.extension(), "rs");
        assert_eq!(MigrationType::from_extension("rs"), Some(MigrationType::Code));
        assert_eq!(MigrationType::from_extension("go"), None);
    }

    #[test]
    fn test_migration_type_from_str() {
        assert_eq!("sql".parse::<MigrationType>().unwrap(), MigrationType::Sql);
        assert_eq!("RS".parse::<MigrationType>().unwrap(), MigrationType::Code);
        assert_eq!("code".parse::<MigrationType>().unwrap(), MigrationType::Code);

        let err = "yaml".parse::<MigrationType>().unwrap_err();
        assert!(err.to_string().contains("unknown migration type 'yaml'"));
    }

    #[test]
    fn test_default_mode_is_timestamp() {
        assert_eq!(VersionMode::default(), VersionMode::Timestamp);
        assert_eq!(VersionMode::Sequential.to_string(), "sequential");
    }

    #[test]
    fn test_sequential_version_padding() {
        assert_eq!(Version::sequential(1, 5).as_str(), "00001");
        assert_eq!(Version::sequential(42, 5).as_str(), "00042");
        assert_eq!(Version::sequential(123456, 5).as_str(), "123456");
        assert_eq!(Version::sequential(8, 0).as_str(), "8");
    }

    #[test]
    fn test_timestamp_version_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let version = Version::from_timestamp(&at);
        assert_eq!(version.as_str(), "20240309070501");
        assert_eq!(version.as_str().len(), 14);
        assert!(version.is_timestamp());
        assert!(!Version::sequential(7, 5).is_timestamp());
    }

    #[test]
    fn test_versions_sort_lexically_within_mode() {
        let earlier = Version::from_timestamp(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 59).unwrap());
        let later = Version::from_timestamp(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap());
        assert!(earlier < later);

        assert!(Version::sequential(9, 5) < Version::sequential(10, 5));
    }
}
