//! `quill list`

use colored::Colorize;
use quill_catalog::{MigrationFile, collect_migrations};
use quill_codegen::CreatorConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    version: i64,
    name: &'a str,
    kind: &'static str,
    timestamped: bool,
    file: String,
}

impl<'a> From<&'a MigrationFile> for ListEntry<'a> {
    fn from(file: &'a MigrationFile) -> Self {
        Self {
            version: file.version,
            name: &file.name,
            kind: file.kind.display_name(),
            timestamped: file.is_timestamped(),
            file: file.file_name(),
        }
    }
}

/// Print the migrations inside the configured version range
pub fn run(config: &CreatorConfig, json: bool) -> anyhow::Result<()> {
    let set = collect_migrations(
        &config.migrations_dir,
        config.min_version,
        config.max_version,
    )?;

    if json {
        let entries: Vec<ListEntry<'_>> = set.iter().map(ListEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if set.is_empty() {
        println!(
            "{} {}",
            "No migrations found in".yellow(),
            config.migrations_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} ({})",
        "Migrations:".cyan().bold(),
        config.migrations_dir.display()
    );
    for file in &set {
        let marker = if file.is_timestamped() {
            "timestamped".blue()
        } else {
            "sequential".magenta()
        };
        println!(
            "  {:>14}  {:<4}  {}  [{}]",
            file.version,
            file.kind.display_name(),
            file.name,
            marker
        );
    }
    println!("{} {}", "Total:".dimmed(), set.len());

    Ok(())
}
