//! Version-ordered collections of migration files

use crate::migration::MigrationFile;
use serde::Serialize;

/// Migration files sorted by ascending version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSet {
    files: Vec<MigrationFile>,
}

impl MigrationSet {
    /// Build a set, sorting the files by version
    pub fn new(mut files: Vec<MigrationFile>) -> Self {
        files.sort_by_key(|f| f.version);
        Self { files }
    }

    /// Only the sequentially numbered migrations
    pub fn versioned(&self) -> MigrationSet {
        self.filtered(|f| !f.is_timestamped())
    }

    /// Only the timestamp-numbered migrations
    pub fn timestamped(&self) -> MigrationSet {
        self.filtered(MigrationFile::is_timestamped)
    }

    /// Highest-versioned migration, if any
    pub fn last(&self) -> Option<&MigrationFile> {
        self.files.last()
    }

    /// Lowest-versioned migration, if any
    pub fn first(&self) -> Option<&MigrationFile> {
        self.files.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MigrationFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&MigrationFile) -> bool) -> MigrationSet {
        MigrationSet {
            files: self.files.iter().filter(|&f| keep(f)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MigrationSet {
    type Item = &'a MigrationFile;
    type IntoIter = std::slice::Iter<'a, MigrationFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
