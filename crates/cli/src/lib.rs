//! # Quill CLI
//!
//! Command-line interface for Quill.
//!
//! ## Commands
//!
//! - `create` - Create a new migration file
//! - `list` - List the migrations found in the migrations directory
//!
//! The version mode is chosen once per invocation and applies to every
//! allocation in that process. `--sequential` (or `QUILL_SEQUENTIAL`) and
//! `--timestamp` override the mode from the config file.

pub mod commands;

use clap::{Parser, Subcommand};
use quill_codegen::{CONFIG_FILE_NAME, CreatorConfig};
use quill_core::{EngineResult, MigrationType, VersionMode};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// Re-export dependencies for use in main.rs
pub use quill_catalog;
pub use quill_codegen;
pub use quill_core;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

/// Scaffold database migration files
#[derive(Debug, Parser)]
#[command(name = "quill", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the migration files
    #[arg(long, global = true, env = "QUILL_DIR")]
    pub dir: Option<PathBuf>,

    /// Number new migrations sequentially instead of by timestamp
    #[arg(long, global = true, env = "QUILL_SEQUENTIAL")]
    pub sequential: bool,

    /// Number new migrations by timestamp even if the config says otherwise
    #[arg(long, global = true, conflicts_with = "sequential")]
    pub timestamp: bool,

    /// JSON configuration file (defaults to ./quill.json when present)
    #[arg(long, global = true, env = "QUILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new migration file
    Create {
        /// Free-form migration name, e.g. "create_orders" or "add users table"
        name: String,

        /// Migration type: sql or rs
        #[arg(default_value = "sql", value_parser = parse_migration_type)]
        migration_type: MigrationType,

        /// Render this Tera template instead of a built-in one
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// List the migrations in the migrations directory
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn parse_migration_type(value: &str) -> Result<MigrationType, String> {
    value.parse().map_err(|e: quill_core::EngineError| e.to_string())
}

// ============================================================================
// Setup
// ============================================================================

/// Install the tracing subscriber. `RUST_LOG` overrides `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the creator configuration from the config file and CLI overrides.
///
/// An explicit `--config` must exist; the implicit `./quill.json` is only
/// read when present.
pub fn resolve_config(cli: &Cli) -> EngineResult<CreatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CreatorConfig::load(path)?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => CreatorConfig::load(CONFIG_FILE_NAME)?,
        None => CreatorConfig::default(),
    };

    if let Some(dir) = &cli.dir {
        config.migrations_dir = dir.clone();
    }
    if cli.sequential {
        config.version_mode = VersionMode::Sequential;
    } else if cli.timestamp {
        config.version_mode = VersionMode::Timestamp;
    }

    config.validate()?;
    Ok(config)
}

/// Run the parsed command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(
        dir = %config.migrations_dir.display(),
        mode = %config.version_mode,
        "resolved configuration"
    );

    match cli.command {
        Commands::Create {
            name,
            migration_type,
            template,
        } => commands::create::run(&config, &name, migration_type, template.as_deref()),
        Commands::List { json } => commands::list::run(&config, json),
    }
}

// ============================================================================
// Tests
// ============================================================================
