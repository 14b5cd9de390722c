//! `quill create`

use anyhow::Context;
use colored::Colorize;
use quill_codegen::{Creator, CreatorConfig, MigrationRequest, Template};
use quill_core::MigrationType;
use std::path::Path;

/// Create one migration file and report where it went
pub fn run(
    config: &CreatorConfig,
    name: &str,
    migration_type: MigrationType,
    template: Option<&Path>,
) -> anyhow::Result<()> {
    let mut request = MigrationRequest::new(name, migration_type);
    if let Some(path) = template {
        let template = Template::from_file(path)
            .with_context(|| format!("loading template {}", path.display()))?;
        request = request.with_template(template);
    }

    let created = Creator::new(config.clone()).create(request)?;

    println!("{} {}", "✓ Created:".green().bold(), created.path.display());
    println!("  {} {}", "Version:".dimmed(), created.version);
    println!("  {} {}", "Template:".dimmed(), created.template);

    Ok(())
}
