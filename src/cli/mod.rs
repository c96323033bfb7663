//! Command-line interface for symref.
//!
//! This module handles argument parsing only. Scanning lives in
//! [`crate::scan`].

use crate::context::ContextWindow;
use crate::scan::{ScanConfig, DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
use clap::Parser;
use std::path::PathBuf;

/// Symref: find every syntactic use of a symbol across a TypeScript project.
///
/// References are written to stdout as a JSON array; diagnostics go to
/// stderr.
#[derive(Parser, Debug)]
#[command(name = "symref")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root directory to scan.
    pub project_root: PathBuf,

    /// Symbol name to find.
    pub symbol: String,

    /// Business domain for service-layer files ("database" scans all domains).
    pub domain: String,

    /// Glob pattern of files to scan, relative to the root (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob pattern of files to skip, relative to the root (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Context lines before each reference.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub before: usize,

    /// Context lines after each reference.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub after: usize,

    /// Worker threads for parsing and scanning.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Emit `{ references, summary }` instead of the bare reference array.
    #[arg(long)]
    pub report: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the scan configuration described by these arguments.
    ///
    /// Empty `--include`/`--exclude` lists fall back to the defaults.
    pub fn to_config(&self) -> ScanConfig {
        let or_default = |given: &[String], default: &[&str]| -> Vec<String> {
            if given.is_empty() {
                default.iter().map(|s| s.to_string()).collect()
            } else {
                given.to_vec()
            }
        };

        let mut config = ScanConfig::new(&self.project_root, &self.symbol, &self.domain)
            .with_include(or_default(&self.include, DEFAULT_INCLUDE))
            .with_exclude(or_default(&self.exclude, DEFAULT_EXCLUDE))
            .with_context(ContextWindow {
                before: self.before,
                after: self.after,
            });
        if let Some(jobs) = self.jobs {
            config = config.with_jobs(jobs);
        }
        config
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}
