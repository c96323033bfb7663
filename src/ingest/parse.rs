//! Parsing a single source file into a [`SourceUnit`].

use crate::error::{Result, SymrefError};
use crate::ingest::detect::detect_language;
use crate::syntax::{lower_tree, SyntaxTree};
use std::path::{Path, PathBuf};

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Full file text.
    pub text: String,
    /// Lowered syntax tree.
    pub tree: SyntaxTree,
}

impl SourceUnit {
    /// Read and parse a file from disk.
    pub fn parse(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| SymrefError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| SymrefError::Parse {
            file: path.to_path_buf(),
            message: format!("File is not valid UTF-8: {}", e.utf8_error()),
        })?;
        Self::from_source(path, text)
    }

    /// Parse already-loaded text. The language is chosen from `path`.
    pub fn from_source(path: &Path, text: String) -> Result<Self> {
        let language = detect_language(path).ok_or_else(|| SymrefError::Parse {
            file: path.to_path_buf(),
            message: "Unknown file extension - cannot detect language".to_string(),
        })?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| SymrefError::Parse {
                file: path.to_path_buf(),
                message: format!("Failed to set {} language: {:?}", language.as_str(), e),
            })?;

        let tree = parser
            .parse(text.as_bytes(), None)
            .ok_or_else(|| SymrefError::Parse {
                file: path.to_path_buf(),
                message: "Parse failed - no tree returned".to_string(),
            })?;

        if tree.root_node().has_error() {
            return Err(SymrefError::Parse {
                file: path.to_path_buf(),
                message: format!(
                    "Tree-sitter detected syntax errors in {} file",
                    language.as_str()
                ),
            });
        }

        let tree = lower_tree(&tree, text.as_bytes());

        Ok(Self {
            path: path.to_path_buf(),
            text,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_typescript() {
        let unit = SourceUnit::from_source(
            Path::new("/project/src/a.ts"),
            "export const answer: number = 42;\n".to_string(),
        )
        .unwrap();
        assert!(!unit.tree.items.is_empty());
        assert_eq!(unit.path, PathBuf::from("/project/src/a.ts"));
    }

    #[test]
    fn test_syntax_errors_are_parse_errors() {
        let result = SourceUnit::from_source(
            Path::new("broken.ts"),
            "function (((( {\n".to_string(),
        );
        match result {
            Err(SymrefError::Parse { file, .. }) => assert_eq!(file, PathBuf::from("broken.ts")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_extension_is_parse_error() {
        let result = SourceUnit::from_source(Path::new("notes.txt"), "foo()".to_string());
        assert!(matches!(result, Err(SymrefError::Parse { .. })));
    }

    #[test]
    fn test_jsx_uses_javascript_grammar() {
        let unit = SourceUnit::from_source(
            Path::new("view.jsx"),
            "const v = <div onClick={handle} />;\n".to_string(),
        );
        assert!(unit.is_ok());
    }

    #[test]
    fn test_non_utf8_file_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin1.ts");
        std::fs::write(&path, [0x63, 0x6f, 0x6e, 0x73, 0x74, 0x20, 0xff, 0xfe]).unwrap();
        assert!(matches!(
            SourceUnit::parse(&path),
            Err(SymrefError::Parse { .. })
        ));
    }
}
