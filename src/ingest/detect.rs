//! Language detection from file extensions.
//!
//! Table-driven language detection. No heuristics, no guessing.
//! Unknown extensions return None, never infer from content.

use std::path::Path;

/// Source languages the scanner can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
    /// JavaScript (.js, .mjs, .cjs, .jsx)
    JavaScript,
}

impl Language {
    /// Convert language to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
        }
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::language_typescript(),
            Language::Tsx => tree_sitter_typescript::language_tsx(),
            Language::JavaScript => tree_sitter_javascript::language(),
        }
    }
}

/// Detect source language from file path.
///
/// # Examples
///
/// ```
/// # use symref::ingest::detect::{detect_language, Language};
/// # use std::path::Path;
/// assert_eq!(detect_language(Path::new("user.service.ts")), Some(Language::TypeScript));
/// assert_eq!(detect_language(Path::new("README.md")), None);
/// ```
pub fn detect_language(path: &Path) -> Option<Language> {
    let extension = path.extension()?.to_str()?;

    let language = match extension {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
        _ => return None,
    };

    Some(language)
}
