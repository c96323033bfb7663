//! Scan driver.
//!
//! Threads a [`ScanConfig`] through discovery, classification, parsing,
//! detection and aggregation. Per-file work runs on a bounded rayon pool and
//! shares nothing; the aggregator restores a deterministic order afterwards.

use crate::classify::{categorize, in_scope, Category};
use crate::context::{ContextExtractor, ContextWindow};
use crate::error::{Result, SymrefError};
use crate::ingest::{relative_path, PatternSet, SourceSet, SourceUnit};
use crate::references::{scan_unit, Reference};
use crate::report::{Aggregator, ScanReport, SkippedFile};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Include patterns used when none are given.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx"];

/// Exclude patterns used when none are given.
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/coverage/**",
    "**/.git/**",
    "**/*.d.ts",
];

/// Everything one scan needs. Built per invocation, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory to scan.
    pub project_root: PathBuf,
    /// Symbol name to find.
    pub symbol: String,
    /// Domain used to narrow service-layer files.
    pub domain_filter: String,
    /// Glob patterns a file must match (any).
    pub include: Vec<String>,
    /// Glob patterns that exclude a file (any).
    pub exclude: Vec<String>,
    /// Context lines around each reference.
    pub context: ContextWindow,
    /// Worker threads; rayon's default when None.
    pub jobs: Option<usize>,
}

impl ScanConfig {
    /// Create a configuration with default patterns and context window.
    pub fn new(
        project_root: impl Into<PathBuf>,
        symbol: impl Into<String>,
        domain_filter: impl Into<String>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            symbol: symbol.into(),
            domain_filter: domain_filter.into(),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            context: ContextWindow::default(),
            jobs: None,
        }
    }

    /// Replace the include patterns.
    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    /// Replace the exclude patterns.
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set the context window.
    pub fn with_context(mut self, context: ContextWindow) -> Self {
        self.context = context;
        self
    }

    /// Bound the worker pool.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Reject configurations that cannot produce a meaningful scan.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(SymrefError::configuration("Symbol name must not be empty"));
        }
        if self.jobs == Some(0) {
            return Err(SymrefError::configuration("Worker count must be at least 1"));
        }
        if self.include.is_empty() {
            return Err(SymrefError::configuration(
                "At least one include pattern is required",
            ));
        }
        Ok(())
    }
}

/// Outcome of scanning one file.
enum FileOutcome {
    /// Not part of the requested domain.
    OutOfScope,
    /// Parsed and scanned.
    Scanned(Vec<Reference>),
    /// Failed to parse.
    Skipped(SkippedFile),
}

/// Run a complete scan.
///
/// Fails with `SymrefError::Configuration` before reading any file when the
/// configuration is invalid, and with `SymrefError::AllFilesFailed` when
/// files were matched but none could be parsed. Other per-file parse
/// failures are logged and reported in [`ScanReport::skipped`].
pub fn run_scan(config: &ScanConfig) -> Result<ScanReport> {
    config.validate()?;

    let patterns = PatternSet::new(&config.include, &config.exclude)?;
    let source_set = SourceSet::discover(&config.project_root, &patterns)?;
    log::info!(
        "Matched {} source files under {}",
        source_set.files.len(),
        source_set.root.display()
    );

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = config.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let outcomes: Vec<Result<FileOutcome>> = pool.install(|| {
        source_set
            .files
            .par_iter()
            .map(|path| scan_file(&source_set.root, path, config))
            .collect()
    });

    let mut aggregator = Aggregator::new();
    let mut skipped = Vec::new();
    let mut attempted = 0;
    for outcome in outcomes {
        match outcome? {
            FileOutcome::OutOfScope => {}
            FileOutcome::Scanned(references) => {
                attempted += 1;
                aggregator.extend(references);
            }
            FileOutcome::Skipped(file) => {
                attempted += 1;
                skipped.push(file);
            }
        }
    }

    if attempted > 0 && skipped.len() == attempted {
        return Err(SymrefError::AllFilesFailed { count: attempted });
    }

    let (references, summary) = aggregator.finish();
    log::info!("Found {} references", references.len());

    Ok(ScanReport {
        root: source_set.root,
        references,
        summary,
        files_scanned: source_set.files.len(),
        skipped,
    })
}

/// Gate, parse and scan one file.
///
/// Parse failures become [`FileOutcome::Skipped`]; any other error aborts
/// the whole run.
fn scan_file(root: &Path, path: &Path, config: &ScanConfig) -> Result<FileOutcome> {
    let relative = relative_path(root, path);
    let category = categorize(&relative);
    if !in_scope(&relative, category, &config.domain_filter) {
        log::debug!(
            "Skipping {} (outside domain '{}')",
            relative,
            config.domain_filter
        );
        return Ok(FileOutcome::OutOfScope);
    }

    let unit = match SourceUnit::parse(path) {
        Ok(unit) => unit,
        Err(SymrefError::Parse { file, message }) => {
            log::warn!("Skipping {}: {}", file.display(), message);
            return Ok(FileOutcome::Skipped(SkippedFile {
                file,
                reason: message,
            }));
        }
        Err(e) => return Err(e),
    };

    Ok(FileOutcome::Scanned(collect_references(&unit, category, config)))
}

/// Attach file, category and context to the raw hits of one unit.
fn collect_references(
    unit: &SourceUnit,
    category: Category,
    config: &ScanConfig,
) -> Vec<Reference> {
    let hits = scan_unit(unit, &config.symbol);
    if hits.is_empty() {
        return Vec::new();
    }

    let extractor = ContextExtractor::new(&unit.text, config.context);
    let file = unit.path.to_string_lossy().into_owned();

    hits.into_iter()
        .map(|hit| Reference {
            file: file.clone(),
            line: hit.line,
            ref_type: hit.ref_type,
            category,
            context: extractor.render(hit.line),
        })
        .collect()
}
