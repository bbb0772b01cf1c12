//! `ensemble generate` — run the brief-to-repository chain for one target.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use ensemble_build::{generate, WriteOutcome};
use ensemble_core::PolicyCatalog;

use super::super::ParserArg;

/// Arguments for `ensemble generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the brief document.
    pub brief: PathBuf,

    /// Target directory for the generated tree. Must be absent or empty.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: PathBuf,

    /// Parse strategy for the brief: yaml | minimal.
    #[arg(long, value_name = "STRATEGY", default_value = "yaml")]
    pub parser: ParserArg,

    /// Show what would be written without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let catalog = PolicyCatalog::builtin();
        let report = match generate(
            &self.brief,
            &self.out,
            self.parser.into(),
            &catalog,
            self.dry_run,
        ) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("{} {err}", "✗".red().bold());
                std::process::exit(err.exit_code());
            }
        };

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!(
            "{prefix}{} generated {} files into '{}'",
            "✓".green().bold(),
            report.outcomes.len(),
            self.out.display()
        );
        for outcome in &report.outcomes {
            let glyph = match outcome {
                WriteOutcome::Written { .. } => "✎",
                WriteOutcome::WouldWrite { .. } => "~",
            };
            let exec = if outcome.executable() { "  (exec)" } else { "" };
            println!("  {glyph}  {}{exec}", outcome.path().display());
        }
        println!("  tree digest: {}", report.digest);
        Ok(())
    }
}
