//! Symref error types.
//!
//! All errors are typed and provide root cause information.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for symref operations.
#[derive(Error, Debug)]
pub enum SymrefError {
    /// Invalid invocation: missing root, empty symbol, bad option values.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration.
        message: String,
    },

    /// An include or exclude pattern is not a valid glob.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error during file operations.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Tree-sitter parsing error.
    #[error("Parse error in {file}: {message}")]
    Parse {
        /// The file that failed to parse.
        file: PathBuf,
        /// The parse error message.
        message: String,
    },

    /// Every matched source file failed to parse.
    #[error("All {count} matched source files failed to parse")]
    AllFilesFailed {
        /// Number of files that were attempted.
        count: usize,
    },

    /// The worker pool could not be started.
    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SymrefError {
    /// Build a configuration error from any message.
    pub fn configuration(message: impl Into<String>) -> Self {
        SymrefError::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error stems from how the tool was invoked.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SymrefError::Configuration { .. } | SymrefError::Pattern(_)
        )
    }
}

/// Result type alias for symref operations.
pub type Result<T> = std::result::Result<T, SymrefError>;
