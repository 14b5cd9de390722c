//! Quill - migration file scaffolding
//!
//! Usage:
//!   quill create <name> [sql|rs] [--template FILE]
//!   quill list [--json]

use clap::Parser;
use colored::Colorize;
use quill_cli::{Cli, init_tracing, run};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
