//! Aggregation, ordering and summary of references.

use crate::classify::Category;
use crate::references::{RefType, Reference};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Reference counts by role and by category.
///
/// Every key is present, zero when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Count per role.
    #[serde(rename = "countsByType")]
    pub by_type: BTreeMap<RefType, usize>,
    /// Count per category.
    #[serde(rename = "countsByCategory")]
    pub by_category: BTreeMap<Category, usize>,
}

impl Summary {
    /// Count the given references.
    pub fn from_references(references: &[Reference]) -> Self {
        let mut by_type: BTreeMap<_, _> = RefType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut by_category: BTreeMap<_, _> = Category::ALL.iter().map(|c| (*c, 0)).collect();

        for reference in references {
            *by_type.entry(reference.ref_type).or_insert(0) += 1;
            *by_category.entry(reference.category).or_insert(0) += 1;
        }

        Self {
            by_type,
            by_category,
        }
    }

    /// Human-readable count tables for diagnostics.
    pub fn render_table(&self) -> String {
        let mut out = String::from("By type:\n");
        for (ref_type, count) in &self.by_type {
            out.push_str(&format!("  {:<12} {:>6}\n", ref_type.as_str(), count));
        }
        out.push_str("By category:\n");
        for (category, count) in &self.by_category {
            out.push_str(&format!("  {:<12} {:>6}\n", category.as_str(), count));
        }
        out
    }
}

/// A file that could not be parsed and was left out of the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Path of the file.
    pub file: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// The complete result of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Canonical project root.
    #[serde(skip)]
    pub root: PathBuf,
    /// All references, in output order.
    pub references: Vec<Reference>,
    /// Counts derived from `references`.
    pub summary: Summary,
    /// Number of files the source set matched.
    #[serde(skip)]
    pub files_scanned: usize,
    /// Files skipped because they failed to parse.
    #[serde(skip)]
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Serialize the reference list as a JSON array.
    pub fn references_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.references)?)
    }

    /// Serialize `{ "references": [...], "summary": {...} }`.
    pub fn report_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Collects per-file references and produces the ordered result.
#[derive(Debug, Default)]
pub struct Aggregator {
    references: Vec<Reference>,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file's references. Arrival order does not matter.
    pub fn extend(&mut self, references: impl IntoIterator<Item = Reference>) {
        self.references.extend(references);
    }

    /// Sort by file then line (role breaks ties), drop repeated
    /// (file, line, role) entries, and count.
    pub fn finish(mut self) -> (Vec<Reference>, Summary) {
        self.references.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.ref_type.cmp(&b.ref_type))
        });

        let mut seen = HashSet::new();
        self.references
            .retain(|r| seen.insert((r.file.clone(), r.line, r.ref_type)));

        let summary = Summary::from_references(&self.references);
        (self.references, summary)
    }
}
