//! Closed syntax tree used by the reference scanner.
//!
//! Tree-sitter produces a concrete tree whose node kinds are strings. The
//! scanner only cares about a handful of shapes, so parsed files are lowered
//! into [`Node`], a sum type with one variant per shape. Every detection pass
//! matches on it exhaustively.
//!
//! Structural placement encodes the exclusions the scanner needs:
//! - import binding tokens live only inside [`Import`]
//! - declared names live only in [`Declaration::name`]
//! - member names live only in [`Member::property`]
//!
//! so a walk over [`Node::Identifier`] never sees any of them.

pub mod lower;

pub use lower::lower_tree;

/// A name token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Token text.
    pub name: String,
    /// 1-based line.
    pub line: usize,
}

/// How an import statement binds a local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `import { foo } from 'x'` or `import { bar as foo } from 'x'`
    Named,
    /// `import foo from 'x'` or `import foo = require('x')`
    Default,
    /// `import * as foo from 'x'`
    Namespace,
}

/// A local name bound by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// The local (possibly aliased) name.
    pub local: Ident,
    /// Binding form.
    pub kind: BindingKind,
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Line of the `import` keyword.
    pub line: usize,
    /// Names bound by the statement, in source order.
    pub bindings: Vec<ImportBinding>,
}

/// A call expression `callee(arguments)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Line the call expression starts on.
    pub line: usize,
    /// The called expression.
    pub callee: Box<Node>,
    /// Argument expressions.
    pub arguments: Vec<Node>,
}

/// A member access `object.property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Line the member expression starts on.
    pub line: usize,
    /// The receiver expression.
    pub object: Box<Node>,
    /// The accessed member name.
    pub property: Ident,
}

/// What a [`Declaration`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Function declaration or named function expression.
    Function,
    /// Method definition inside a class or object literal.
    Method,
    /// Variable declarator (`const foo = ...`).
    Variable,
}

/// A declaration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration form.
    pub kind: DeclarationKind,
    /// Declared name, when it is a single token.
    pub name: Option<Ident>,
    /// Everything inside the declaration except the name.
    pub children: Vec<Node>,
}

/// A lowered syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Import statement.
    Import(Import),
    /// Call expression.
    Call(Call),
    /// Member access expression.
    Member(Member),
    /// Identifier in expression position.
    Identifier(Ident),
    /// Function, method or variable declaration.
    Declaration(Declaration),
    /// Any other node, reduced to its children.
    Other(Vec<Node>),
}

impl Node {
    /// Direct children of this node, in source order.
    ///
    /// Import bindings, declared names and member names are not nodes and
    /// are never yielded.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Import(_) | Node::Identifier(_) => Vec::new(),
            Node::Call(call) => std::iter::once(call.callee.as_ref())
                .chain(call.arguments.iter())
                .collect(),
            Node::Member(member) => vec![member.object.as_ref()],
            Node::Declaration(decl) => decl.children.iter().collect(),
            Node::Other(children) => children.iter().collect(),
        }
    }
}

/// The lowered tree of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    /// Top-level nodes.
    pub items: Vec<Node>,
}

impl SyntaxTree {
    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        fn go<'a>(node: &'a Node, visit: &mut impl FnMut(&'a Node)) {
            visit(node);
            for child in node.children() {
                go(child, visit);
            }
        }

        for item in &self.items {
            go(item, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, line: usize) -> Ident {
        Ident {
            name: name.to_string(),
            line,
        }
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = SyntaxTree {
            items: vec![Node::Call(Call {
                line: 1,
                callee: Box::new(Node::Identifier(ident("f", 1))),
                arguments: vec![Node::Identifier(ident("a", 2))],
            })],
        };

        let mut seen = Vec::new();
        tree.walk(&mut |node| {
            if let Node::Identifier(id) = node {
                seen.push(id.name.clone());
            }
        });

        assert_eq!(seen, vec!["f", "a"]);
    }

    #[test]
    fn test_declaration_name_is_not_a_child() {
        let decl = Node::Declaration(Declaration {
            kind: DeclarationKind::Function,
            name: Some(ident("foo", 1)),
            children: vec![Node::Other(Vec::new())],
        });

        assert_eq!(decl.children().len(), 1);
        assert!(!matches!(decl.children()[0], Node::Identifier(_)));
    }
}
