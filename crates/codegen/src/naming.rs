//! # Name Classification
//!
//! Turns the free-form migration name into the pieces the rest of the
//! pipeline needs:
//!
//! - a snake_case [`Slug`] used in the file name,
//! - a [`CommandIntent`] read from the first slug token (`create`, `update`),
//! - the table fragment, which is the second slug token.
//!
//! The split is positional: `create_user_roles` targets `user`, and nothing
//! checks that the fragment names a real table.

use heck::{ToSnakeCase, ToUpperCamelCase};
use quill_core::{EngineError, EngineResult};
use std::fmt;

// ============================================================================
// Slug
// ============================================================================

/// snake_case form of a migration name, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for `raw_name`.
    ///
    /// Punctuation and whitespace become word boundaries, so the result
    /// only contains lowercase alphanumerics and single underscores.
    pub fn new(raw_name: &str) -> EngineResult<Self> {
        let slug = raw_name.to_snake_case();
        if slug.is_empty() {
            return Err(EngineError::invalid_name(
                raw_name,
                "name must contain at least one letter or digit",
            ));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split on the first underscore into `(head, rest)`
    fn split_first(&self) -> (&str, Option<&str>) {
        match self.0.split_once('_') {
            Some((head, rest)) => (head, Some(rest)),
            None => (&self.0, None),
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// CommandIntent
// ============================================================================

/// What a SQL migration is expected to do, read from its first name token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandIntent {
    Create,
    Update,
    Other,
}

impl CommandIntent {
    /// Match a slug token case-insensitively
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("create") {
            CommandIntent::Create
        } else if token.eq_ignore_ascii_case("update") {
            CommandIntent::Update
        } else {
            CommandIntent::Other
        }
    }

    /// Whether the built-in template for this intent needs a table name
    pub fn needs_table(&self) -> bool {
        matches!(self, CommandIntent::Create | CommandIntent::Update)
    }
}

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandIntent::Create => write!(f, "create"),
            CommandIntent::Update => write!(f, "update"),
            CommandIntent::Other => write!(f, "other"),
        }
    }
}

// ============================================================================
// Inference
// ============================================================================

/// Intent and optional table fragment read from a slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInference {
    pub intent: CommandIntent,
    pub table_fragment: Option<String>,
}

impl CommandInference {
    /// Read the intent and table fragment from `slug`
    pub fn from_slug(slug: &Slug) -> Self {
        let (head, rest) = slug.split_first();
        let table_fragment = rest
            .and_then(|r| r.split('_').next())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            intent: CommandIntent::from_token(head),
            table_fragment,
        }
    }

    /// The table fragment, or a `MalformedName` error naming the slug
    pub fn require_table(&self, slug: &Slug) -> EngineResult<&str> {
        self.table_fragment.as_deref().ok_or_else(|| {
            EngineError::malformed_name(
                slug.as_str(),
                format!(
                    "expected '<command>_<table>', found no table name after '{}'",
                    slug.split_first().0
                ),
            )
        })
    }
}

/// Full classification of a migration name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub slug: Slug,
    pub intent: CommandIntent,
    pub table_fragment: String,
}

/// Classify `raw_name` into slug, intent and table fragment.
///
/// # Errors
///
/// - [`EngineError::InvalidName`] if the name has no usable characters
/// - [`EngineError::MalformedName`] if the slug has no second token
pub fn classify(raw_name: &str) -> EngineResult<Classification> {
    let slug = Slug::new(raw_name)?;
    let inference = CommandInference::from_slug(&slug);
    let table_fragment = inference.require_table(&slug)?.to_string();

    Ok(Classification {
        slug,
        intent: inference.intent,
        table_fragment,
    })
}

/// UpperCamelCase form of the raw name, used for Rust identifiers.
///
/// Derived from the raw name directly, not from the slug.
pub fn camel_name(raw_name: &str) -> String {
    raw_name.to_upper_camel_case()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_phrases() {
        assert_eq!(Slug::new("add users table").unwrap().as_str(), "add_users_table");
        assert_eq!(Slug::new("AddIndex").unwrap().as_str(), "add_index");
        assert_eq!(Slug::new("create_orders").unwrap().as_str(), "create_orders");
        assert_eq!(Slug::new("  Drop-Old  Tokens! ").unwrap().as_str(), "drop_old_tokens");
    }

    #[test]
    fn test_slug_rejects_empty_names() {
        for raw in ["", "   ", "\t\n", "!!!", "__"] {
            let err = Slug::new(raw).unwrap_err();
            assert!(matches!(err, EngineError::InvalidName { .. }), "{raw:?}");
        }
    }

    #[test]
    fn test_classify_create() {
        let c = classify("create_orders").unwrap();
        assert_eq!(c.slug.as_str(), "create_orders");
        assert_eq!(c.intent, CommandIntent::Create);
        assert_eq!(c.table_fragment, "orders");
    }

    #[test]
    fn test_classify_update_is_case_insensitive() {
        let c = classify("UPDATE Accounts").unwrap();
        assert_eq!(c.intent, CommandIntent::Update);
        assert_eq!(c.table_fragment, "accounts");
    }

    #[test]
    fn test_classify_other_intent() {
        let c = classify("add users table").unwrap();
        assert_eq!(c.intent, CommandIntent::Other);
        assert_eq!(c.table_fragment, "users");
    }

    #[test]
    fn test_classify_takes_second_token_only() {
        let c = classify("create_user_roles").unwrap();
        assert_eq!(c.table_fragment, "user");
    }

    #[test]
    fn test_classify_without_underscore_is_malformed() {
        for raw in ["create", "init", "Init"] {
            let err = classify(raw).unwrap_err();
            assert!(matches!(err, EngineError::MalformedName { .. }), "{raw}");
        }
    }

    #[test]
    fn test_inference_without_table() {
        let slug = Slug::new("init").unwrap();
        let inference = CommandInference::from_slug(&slug);
        assert_eq!(inference.intent, CommandIntent::Other);
        assert_eq!(inference.table_fragment, None);
        assert!(inference.require_table(&slug).is_err());
    }

    #[test]
    fn test_intent_needs_table() {
        assert!(CommandIntent::Create.needs_table());
        assert!(CommandIntent::Update.needs_table());
        assert!(!CommandIntent::Other.needs_table());
    }

    #[test]
    fn test_camel_name() {
        assert_eq!(camel_name("AddIndex"), "AddIndex");
        assert_eq!(camel_name("add users table"), "AddUsersTable");
        assert_eq!(camel_name("create_orders"), "CreateOrders");
    }
}
