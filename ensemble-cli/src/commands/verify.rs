//! `ensemble verify` — scan a generated tree and report every violation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use ensemble_verify::{verify_tree, ValidationReport, Violation};

/// Arguments for `ensemble verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Root of the generated tree to verify.
    pub dir: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct VerifyReportJson {
    summary: VerifySummaryJson,
    violations: Vec<Violation>,
}

#[derive(Serialize)]
struct VerifySummaryJson {
    root: String,
    violations: usize,
    clean: bool,
}

#[derive(Tabled)]
struct ViolationTableRow {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "problem")]
    message: String,
}

impl VerifyArgs {
    pub fn run(self) -> Result<()> {
        let report = verify_tree(&self.dir)
            .with_context(|| format!("verification failed for '{}'", self.dir.display()))?;

        if self.json {
            print_json(&self.dir, &report)?;
        } else {
            print_human(&self.dir, &report);
        }

        if report.is_empty() {
            Ok(())
        } else {
            std::process::exit(1);
        }
    }
}

fn print_json(root: &Path, report: &ValidationReport) -> Result<()> {
    let payload = VerifyReportJson {
        summary: VerifySummaryJson {
            root: root.display().to_string(),
            violations: report.len(),
            clean: report.is_empty(),
        },
        violations: report.violations.clone(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize verify JSON")?
    );
    Ok(())
}

fn print_human(root: &Path, report: &ValidationReport) {
    if report.is_empty() {
        println!("{} '{}' verified clean", "✓".green().bold(), root.display());
        return;
    }

    println!(
        "{} '{}' has {} violation(s)",
        "✗".red().bold(),
        root.display(),
        report.len()
    );
    let rows: Vec<ViolationTableRow> = report
        .violations
        .iter()
        .map(|v| ViolationTableRow {
            kind: v.kind.to_string(),
            path: v.path.clone(),
            message: v.message.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
