//! Symref: AST-based cross-reference finder for TypeScript/JavaScript.
//!
//! This library locates every syntactic use of a named symbol across a
//! source tree, classifies each use by role and architectural layer, and
//! produces an ordered report with surrounding source context.

#![warn(missing_docs)]

pub mod classify;
pub mod cli;
pub mod context;
pub mod error;
pub mod ingest;
pub mod references;
pub mod report;
pub mod scan;
pub mod syntax;

/// Re-export common error types for convenience.
pub use error::{Result, SymrefError};

/// Re-export the scan entry point for convenience.
pub use scan::{run_scan, ScanConfig};

/// Symref version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
