//! Filesystem → tree-sitter → syntax tree ingestion.
//!
//! Discovers the source set under a project root and parses each file
//! into a [`SourceUnit`].

pub mod detect;
pub mod loader;
pub mod parse;

pub use detect::{detect_language, Language};
pub use loader::{relative_path, PatternSet, SourceSet};
pub use parse::SourceUnit;
