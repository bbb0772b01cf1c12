//! Ensemble — brief-to-repository workflow generator CLI.
//!
//! # Usage
//!
//! ```text
//! ensemble generate <brief> --out <dir> [--parser yaml|minimal] [--dry-run]
//! ensemble verify <dir> [--json]
//! ensemble policies
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{generate::GenerateArgs, verify::VerifyArgs};
use ensemble_core::ParseStrategy;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ensemble",
    version,
    about = "Generate a PR-driven multi-role workflow repository from a brief",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a workflow repository from a brief document.
    Generate(GenerateArgs),

    /// Re-verify a generated tree against its own documents.
    Verify(VerifyArgs),

    /// List the known policy modules briefs may declare.
    Policies,
}

// ---------------------------------------------------------------------------
// Shared ParseStrategy argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ParseStrategy` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct ParserArg(pub ParseStrategy);

impl FromStr for ParserArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" => Ok(Self(ParseStrategy::Yaml)),
            "minimal" => Ok(Self(ParseStrategy::Minimal)),
            other => Err(format!("unknown parser '{other}'; expected: yaml, minimal")),
        }
    }
}

impl fmt::Display for ParserArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ParserArg> for ParseStrategy {
    fn from(p: ParserArg) -> Self {
        p.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Verify(args) => args.run(),
        Commands::Policies => commands::policies::run(),
    }
}
