//! Per-file detection passes.
//!
//! # Algorithm
//! Five independent traversals over the same tree, in precedence order:
//! 1. import bindings → `import`
//! 2. calls with an identifier callee → `direct-call`
//! 3. calls with a member callee → `method-call`
//! 4. member accesses that are not callees → `callback`
//! 5. remaining identifiers → `callback`
//!
//! Passes 1-3 keep one hit per (line, role). Passes 4-5 only emit on lines
//! that have no hit yet, so a token already classified is never reported
//! again under a lower-precedence role.

use crate::ingest::SourceUnit;
use crate::references::RefType;
use crate::syntax::{BindingKind, Node, SyntaxTree};
use std::collections::HashSet;

/// A detection before file, category and context are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHit {
    /// 1-based line.
    pub line: usize,
    /// Role assigned by the detecting pass.
    pub ref_type: RefType,
}

/// Accepted hits plus the indexes used for duplicate checks.
#[derive(Debug, Default)]
struct HitSet {
    hits: Vec<RawHit>,
    lines: HashSet<usize>,
    typed: HashSet<(usize, RefType)>,
}

impl HitSet {
    /// Accept a hit unless the same (line, role) is already present.
    fn accept(&mut self, line: usize, ref_type: RefType) {
        if self.typed.insert((line, ref_type)) {
            self.lines.insert(line);
            self.hits.push(RawHit { line, ref_type });
        }
    }

    /// Accept a callback hit only on a line with no hit yet.
    fn accept_callback(&mut self, line: usize) {
        if !self.lines.contains(&line) {
            self.accept(line, RefType::Callback);
        }
    }
}

/// Where a node sits relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// The called expression of a call.
    Callee,
    /// The object of a member access.
    Receiver,
    /// Any other position.
    Value,
}

/// Pre-order walk that reports the slot each node occupies.
fn walk_slots<'a>(tree: &'a SyntaxTree, visit: &mut impl FnMut(&'a Node, Slot)) {
    fn go<'a>(node: &'a Node, slot: Slot, visit: &mut impl FnMut(&'a Node, Slot)) {
        visit(node, slot);
        match node {
            Node::Call(call) => {
                go(&call.callee, Slot::Callee, visit);
                for argument in &call.arguments {
                    go(argument, Slot::Value, visit);
                }
            }
            Node::Member(member) => go(&member.object, Slot::Receiver, visit),
            Node::Declaration(decl) => {
                for child in &decl.children {
                    go(child, Slot::Value, visit);
                }
            }
            Node::Other(children) => {
                for child in children {
                    go(child, Slot::Value, visit);
                }
            }
            Node::Import(_) | Node::Identifier(_) => {}
        }
    }

    for item in &tree.items {
        go(item, Slot::Value, visit);
    }
}

/// Scan a parsed file for uses of `symbol`, in discovery order.
pub fn scan_unit(unit: &SourceUnit, symbol: &str) -> Vec<RawHit> {
    scan_tree(&unit.tree, symbol)
}

/// Run all detection passes over a lowered tree.
pub fn scan_tree(tree: &SyntaxTree, symbol: &str) -> Vec<RawHit> {
    let mut hits = HitSet::default();

    import_pass(tree, symbol, &mut hits);
    direct_call_pass(tree, symbol, &mut hits);
    method_call_pass(tree, symbol, &mut hits);
    member_access_pass(tree, symbol, &mut hits);
    identifier_pass(tree, symbol, &mut hits);

    hits.hits
}

/// Named imports by local name and default imports.
///
/// Namespace imports (`import * as foo`) bind a module object, not the
/// symbol, and are not reported.
fn import_pass(tree: &SyntaxTree, symbol: &str, hits: &mut HitSet) {
    tree.walk(&mut |node| match node {
        Node::Import(import) => {
            for binding in &import.bindings {
                let counts = match binding.kind {
                    BindingKind::Named | BindingKind::Default => true,
                    BindingKind::Namespace => false,
                };
                if counts && binding.local.name == symbol {
                    hits.accept(binding.local.line, RefType::Import);
                }
            }
        }
        Node::Call(_)
        | Node::Member(_)
        | Node::Identifier(_)
        | Node::Declaration(_)
        | Node::Other(_) => {}
    });
}

fn direct_call_pass(tree: &SyntaxTree, symbol: &str, hits: &mut HitSet) {
    tree.walk(&mut |node| match node {
        Node::Call(call) => {
            if matches!(call.callee.as_ref(), Node::Identifier(id) if id.name == symbol) {
                hits.accept(call.line, RefType::DirectCall);
            }
        }
        Node::Import(_)
        | Node::Member(_)
        | Node::Identifier(_)
        | Node::Declaration(_)
        | Node::Other(_) => {}
    });
}

fn method_call_pass(tree: &SyntaxTree, symbol: &str, hits: &mut HitSet) {
    tree.walk(&mut |node| match node {
        Node::Call(call) => {
            if matches!(call.callee.as_ref(), Node::Member(m) if m.property.name == symbol) {
                hits.accept(call.line, RefType::MethodCall);
            }
        }
        Node::Import(_)
        | Node::Member(_)
        | Node::Identifier(_)
        | Node::Declaration(_)
        | Node::Other(_) => {}
    });
}

/// `obj.foo` passed or stored without being called. A receiver
/// (`obj.foo.bar`) still counts.
fn member_access_pass(tree: &SyntaxTree, symbol: &str, hits: &mut HitSet) {
    walk_slots(tree, &mut |node, slot| match node {
        Node::Member(member) => {
            if slot != Slot::Callee && member.property.name == symbol {
                hits.accept_callback(member.line);
            }
        }
        Node::Import(_)
        | Node::Call(_)
        | Node::Identifier(_)
        | Node::Declaration(_)
        | Node::Other(_) => {}
    });
}

/// Bare identifiers. Declared names and import bindings are not
/// `Identifier` nodes, callees were settled by the call passes, and the
/// object of a member access is never reported.
///
/// An identifier passed as an argument (`other(foo)`) lands here and is
/// reported as `callback`.
fn identifier_pass(tree: &SyntaxTree, symbol: &str, hits: &mut HitSet) {
    walk_slots(tree, &mut |node, slot| match node {
        Node::Identifier(id) => {
            if slot == Slot::Value && id.name == symbol {
                hits.accept_callback(id.line);
            }
        }
        Node::Import(_)
        | Node::Call(_)
        | Node::Member(_)
        | Node::Declaration(_)
        | Node::Other(_) => {}
    });
}
