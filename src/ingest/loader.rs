//! Source set discovery.
//!
//! Resolves a project root plus include/exclude glob patterns into a sorted
//! list of files. Patterns match root-relative paths with `/` separators.

use crate::error::{Result, SymrefError};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude rules.
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    /// Directory forms of `dir/**` exclusions, used to prune the walk.
    pruned_dirs: Vec<Pattern>,
}

impl PatternSet {
    /// Compile include and exclude patterns.
    ///
    /// Returns `SymrefError::Pattern` for malformed globs.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .map(|p| Pattern::new(p).map_err(SymrefError::from))
                .collect()
        };

        let pruned_dirs = exclude
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .map(|p| Pattern::new(p).map_err(SymrefError::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
            pruned_dirs,
        })
    }

    /// Whether a root-relative file path belongs to the source set.
    pub fn matches_file(&self, relative: &str) -> bool {
        self.include
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
            && !self.is_excluded(relative)
    }

    /// Whether a root-relative path matches any exclusion pattern.
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }

    /// Whether a root-relative directory is excluded wholesale.
    pub fn prunes_dir(&self, relative: &str) -> bool {
        self.pruned_dirs
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }
}

/// The files selected for one scan.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Canonical project root.
    pub root: PathBuf,
    /// Matched files, absolute, sorted by path.
    pub files: Vec<PathBuf>,
}

impl SourceSet {
    /// Walk `root` and collect every file accepted by `patterns`.
    ///
    /// Fails with `SymrefError::Configuration` when the root does not exist,
    /// is not a directory, or cannot be read. Unreadable subdirectories are
    /// logged and skipped.
    pub fn discover(root: &Path, patterns: &PatternSet) -> Result<Self> {
        if !root.exists() {
            return Err(SymrefError::configuration(format!(
                "Project root does not exist: {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(SymrefError::configuration(format!(
                "Project root is not a directory: {}",
                root.display()
            )));
        }

        let root = root.canonicalize().map_err(|e| {
            SymrefError::configuration(format!(
                "Cannot resolve project root {}: {}",
                root.display(),
                e
            ))
        })?;
        std::fs::read_dir(&root).map_err(|e| {
            SymrefError::configuration(format!(
                "Project root is not readable {}: {}",
                root.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let keep = !patterns.prunes_dir(&relative_path(&root, entry.path()));
                if !keep {
                    log::debug!("Pruned directory {}", entry.path().display());
                }
                keep
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_path(&root, entry.path());
            if patterns.matches_file(&relative) {
                log::debug!("Matched {}", relative);
                files.push(entry.into_path());
            }
        }

        files.sort();

        Ok(Self { root, files })
    }
}

/// Root-relative form of `path` using `/` separators.
///
/// Paths outside `root` are returned whole.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}
