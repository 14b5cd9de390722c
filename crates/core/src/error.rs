//! Error types for Quill
//!
//! This module provides unified error handling for migration creation,
//! covering name parsing, version allocation, template rendering, and
//! filesystem access. Every variant carries the offending name or path.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Quill
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Name Errors
    // ========================================================================
    /// The migration name is empty or has no usable characters
    #[error("Invalid migration name '{name}': {message}")]
    InvalidName { name: String, message: String },

    /// A table name could not be derived from the migration name
    #[error("Malformed migration name '{name}': {message}")]
    MalformedName { name: String, message: String },

    // ========================================================================
    // Version Errors
    // ========================================================================
    /// The migrations directory could not be scanned or parsed
    #[error("Failed to allocate version in '{path}': {message}")]
    Allocation { path: PathBuf, message: String },

    /// Two migration files share the same version
    #[error("Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: i64,
        first: PathBuf,
        second: PathBuf,
    },

    // ========================================================================
    // Artifact Errors
    // ========================================================================
    /// A file already exists at the computed migration path
    #[error("Migration file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Template rendering failed
    #[error("Template rendering failed for '{template}': {message}")]
    TemplateRender { template: String, message: String },

    /// Template file could not be loaded
    #[error("Failed to load template '{path}': {message}")]
    TemplateLoad { path: PathBuf, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl EngineError {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::InvalidName {
            name: name.into(),
            message: msg.into(),
        }
    }

    /// Create a malformed name error
    pub fn malformed_name(name: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::MalformedName {
            name: name.into(),
            message: msg.into(),
        }
    }

    /// Create a version allocation error
    pub fn allocation(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        EngineError::Allocation {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a template rendering error
    pub fn template_render(template: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::TemplateRender {
            template: template.into(),
            message: msg.into(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was caused by the migration name
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidName { .. } | EngineError::MalformedName { .. }
        )
    }

    /// Check if this error is a filename collision
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            EngineError::AlreadyExists(_) | EngineError::DuplicateVersion { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::Io(_)
                | EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T>;
}

impl<T, E: Into<EngineError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T> {
        self.map_err(|e| {
            let err: EngineError = e.into();
            EngineError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
