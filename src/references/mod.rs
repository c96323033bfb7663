//! Symbol reference finding over the lowered syntax tree.
//!
//! # Key Concepts
//! - **Reference**: one located occurrence of the target symbol
//! - **Role**: how the symbol is used at that site (import, call, callback)
//! - **Category**: architectural layer of the containing file
//!
//! This is a name-based scanner. Shadowing and re-exports are not resolved:
//! a local variable that happens to share the symbol's name is reported.

pub mod scanner;

use crate::classify::Category;
use serde::Serialize;

pub use scanner::{scan_unit, RawHit};

/// Syntactic role of a reference.
///
/// Declaration order is precedence order: when roles compete for one
/// token, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefType {
    /// Bound by an import statement.
    Import,
    /// Called directly: `foo()`.
    DirectCall,
    /// Called as a member: `obj.foo()`.
    MethodCall,
    /// Any other use: passed along, stored, accessed without calling.
    Callback,
}

impl RefType {
    /// Every role, in precedence order.
    pub const ALL: [RefType; 4] = [
        RefType::Import,
        RefType::DirectCall,
        RefType::MethodCall,
        RefType::Callback,
    ];

    /// Convert to string for output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::Import => "import",
            RefType::DirectCall => "direct-call",
            RefType::MethodCall => "method-call",
            RefType::Callback => "callback",
        }
    }
}

/// One detected occurrence of the target symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Absolute path of the containing file.
    pub file: String,

    /// Line number (1-based).
    pub line: usize,

    /// Syntactic role.
    #[serde(rename = "type")]
    pub ref_type: RefType,

    /// Architectural layer of `file`.
    pub category: Category,

    /// Rendered source lines around `line`.
    pub context: String,
}
