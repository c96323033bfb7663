//! Lowering from tree-sitter concrete trees into [`Node`].
//!
//! Works for both the TypeScript and JavaScript grammars: the node kinds
//! read here are shared between them.

use super::{
    BindingKind, Call, Declaration, DeclarationKind, Ident, Import, ImportBinding, Member, Node,
    SyntaxTree,
};

/// Lower a whole parsed file.
pub fn lower_tree(tree: &tree_sitter::Tree, source: &[u8]) -> SyntaxTree {
    SyntaxTree {
        items: lower_children(tree.root_node(), source),
    }
}

/// Lower all named children of a node, dropping comments and punctuation.
fn lower_children(node: tree_sitter::Node, source: &[u8]) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|child| lower_node(child, source))
        .collect()
}

/// Lower a single node. Returns None for nodes with no scanner meaning.
fn lower_node(node: tree_sitter::Node, source: &[u8]) -> Option<Node> {
    if !node.is_named() {
        return None;
    }

    let lowered = match node.kind() {
        "comment" => return None,
        "import_statement" => Node::Import(lower_import(node, source)),
        "call_expression" => lower_call(node, source),
        "member_expression" => lower_member(node, source),
        "identifier" | "shorthand_property_identifier" => {
            Node::Identifier(ident(node, source)?)
        }
        "function_declaration"
        | "generator_function_declaration"
        | "function_expression"
        | "function"
        | "generator_function" => lower_declaration(node, source, DeclarationKind::Function),
        "pair" => lower_pair(node, source),
        "class_declaration" | "abstract_class_declaration" | "class" => lower_class(node, source),
        "method_definition" => lower_declaration(node, source, DeclarationKind::Method),
        "variable_declarator" => lower_declaration(node, source, DeclarationKind::Variable),
        _ => Node::Other(lower_children(node, source)),
    };

    Some(lowered)
}

/// Read a token's text and 1-based line.
fn ident(node: tree_sitter::Node, source: &[u8]) -> Option<Ident> {
    let name = node.utf8_text(source).ok()?;
    Some(Ident {
        name: name.to_string(),
        line: line_of(node),
    })
}

fn line_of(node: tree_sitter::Node) -> usize {
    node.start_position().row + 1
}

/// Collect the local names bound by an `import_statement`.
fn lower_import(node: tree_sitter::Node, source: &[u8]) -> Import {
    let mut bindings = Vec::new();

    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "import_clause" => {
                for clause_child in child.children(&mut child.walk()) {
                    match clause_child.kind() {
                        // `import foo from 'x'`
                        "identifier" => push_binding(
                            &mut bindings,
                            clause_child,
                            source,
                            BindingKind::Default,
                        ),
                        "named_imports" => {
                            for specifier in clause_child.children(&mut clause_child.walk()) {
                                if specifier.kind() != "import_specifier" {
                                    continue;
                                }
                                // The alias is the local name when present
                                let local = specifier
                                    .child_by_field_name("alias")
                                    .or_else(|| specifier.child_by_field_name("name"));
                                if let Some(local) = local {
                                    push_binding(&mut bindings, local, source, BindingKind::Named);
                                }
                            }
                        }
                        "namespace_import" => {
                            for name_node in clause_child.children(&mut clause_child.walk()) {
                                if name_node.kind() == "identifier" {
                                    push_binding(
                                        &mut bindings,
                                        name_node,
                                        source,
                                        BindingKind::Namespace,
                                    );
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            // `import foo = require('x')`
            "import_require_clause" => {
                for name_node in child.children(&mut child.walk()) {
                    if name_node.kind() == "identifier" {
                        push_binding(&mut bindings, name_node, source, BindingKind::Default);
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Import {
        line: line_of(node),
        bindings,
    }
}

fn push_binding(
    bindings: &mut Vec<ImportBinding>,
    node: tree_sitter::Node,
    source: &[u8],
    kind: BindingKind,
) {
    if let Some(local) = ident(node, source) {
        bindings.push(ImportBinding { local, kind });
    }
}

fn lower_call(node: tree_sitter::Node, source: &[u8]) -> Node {
    let Some(function) = node.child_by_field_name("function") else {
        return Node::Other(lower_children(node, source));
    };

    let callee = lower_node(function, source).unwrap_or_else(|| Node::Other(Vec::new()));
    let arguments = node
        .child_by_field_name("arguments")
        .map(|args| match args.kind() {
            "arguments" => lower_children(args, source),
            // Tagged templates carry a template string instead of an argument list
            _ => lower_node(args, source).into_iter().collect(),
        })
        .unwrap_or_default();

    Node::Call(Call {
        line: line_of(node),
        callee: Box::new(callee),
        arguments,
    })
}

fn lower_member(node: tree_sitter::Node, source: &[u8]) -> Node {
    let object = node.child_by_field_name("object");
    let property = node
        .child_by_field_name("property")
        .and_then(|p| ident(p, source));

    match (object, property) {
        (Some(object), Some(property)) => {
            let object = lower_node(object, source).unwrap_or_else(|| Node::Other(Vec::new()));
            Node::Member(Member {
                line: line_of(node),
                object: Box::new(object),
                property,
            })
        }
        _ => Node::Other(lower_children(node, source)),
    }
}

/// Lower an object literal entry. A plain key (`{ foo: handler }`) is a use
/// of its name, so it becomes an identifier.
fn lower_pair(node: tree_sitter::Node, source: &[u8]) -> Node {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "property_identifier" => ident(child, source).map(Node::Identifier),
            _ => lower_node(child, source),
        })
        .collect();
    Node::Other(children)
}

/// Lower a class. Its name is an ordinary identifier use, not a declaration
/// site, so it stays visible to the scanner.
fn lower_class(node: tree_sitter::Node, source: &[u8]) -> Node {
    let name = node.child_by_field_name("name");
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter_map(|child| {
            if name.is_some_and(|name| name.id() == child.id()) && child.kind() == "type_identifier"
            {
                ident(child, source).map(Node::Identifier)
            } else {
                lower_node(child, source)
            }
        })
        .collect();
    Node::Other(children)
}

/// Lower a declaration, separating a single-token name from the rest.
///
/// Destructuring patterns are not single tokens; they stay among the
/// children.
fn lower_declaration(node: tree_sitter::Node, source: &[u8], kind: DeclarationKind) -> Node {
    let name_node = node.child_by_field_name("name").filter(|n| {
        matches!(
            n.kind(),
            "identifier" | "type_identifier" | "property_identifier" | "private_property_identifier"
        )
    });

    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| name_node.map_or(true, |name| child.id() != name.id()))
        .filter_map(|child| lower_node(child, source))
        .collect();

    Node::Declaration(Declaration {
        kind,
        name: name_node.and_then(|n| ident(n, source)),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_ts(source: &str) -> SyntaxTree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::language_typescript())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        lower_tree(&tree, source.as_bytes())
    }

    fn collect<'a>(tree: &'a SyntaxTree, pick: impl Fn(&'a Node) -> bool) -> Vec<&'a Node> {
        let mut out = Vec::new();
        tree.walk(&mut |node| {
            if pick(node) {
                out.push(node);
            }
        });
        out
    }

    #[test]
    fn test_import_bindings_use_local_names() {
        let tree = lower_ts("import def, { a, b as c } from 'x';\nimport * as ns from 'y';\n");
        let imports = collect(&tree, |n| matches!(n, Node::Import(_)));
        assert_eq!(imports.len(), 2);

        let Node::Import(first) = imports[0] else {
            unreachable!()
        };
        let names: Vec<_> = first
            .bindings
            .iter()
            .map(|b| (b.local.name.as_str(), b.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                ("def", BindingKind::Default),
                ("a", BindingKind::Named),
                ("c", BindingKind::Named),
            ]
        );

        let Node::Import(second) = imports[1] else {
            unreachable!()
        };
        assert_eq!(second.line, 2);
        assert_eq!(second.bindings[0].kind, BindingKind::Namespace);
    }

    #[test]
    fn test_import_tokens_are_not_identifiers() {
        let tree = lower_ts("import { foo } from 'x';\n");
        assert!(collect(&tree, |n| matches!(n, Node::Identifier(_))).is_empty());
    }

    #[test]
    fn test_call_and_member_shapes() {
        let tree = lower_ts("obj.run(arg);\n");
        let calls = collect(&tree, |n| matches!(n, Node::Call(_)));
        assert_eq!(calls.len(), 1);

        let Node::Call(call) = calls[0] else {
            unreachable!()
        };
        let Node::Member(member) = call.callee.as_ref() else {
            panic!("expected member callee, got {:?}", call.callee);
        };
        assert_eq!(member.property.name, "run");
        assert!(matches!(member.object.as_ref(), Node::Identifier(id) if id.name == "obj"));
        assert!(matches!(&call.arguments[..], [Node::Identifier(id)] if id.name == "arg"));
    }

    #[test]
    fn test_declaration_names_are_separated() {
        let tree = lower_ts("function foo(x) { return x; }\nconst bar = foo;\n");
        let decls = collect(&tree, |n| matches!(n, Node::Declaration(_)));
        let names: Vec<_> = decls
            .iter()
            .filter_map(|n| match n {
                Node::Declaration(d) => d.name.as_ref().map(|i| (i.name.as_str(), d.kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("foo", DeclarationKind::Function),
                ("bar", DeclarationKind::Variable),
            ]
        );

        let idents: Vec<_> = collect(&tree, |n| matches!(n, Node::Identifier(_)))
            .into_iter()
            .filter_map(|n| match n {
                Node::Identifier(id) => Some((id.name.as_str(), id.line)),
                _ => None,
            })
            .collect();
        // `foo` is only seen as the initializer on line 2
        assert!(idents.contains(&("foo", 2)));
        assert!(!idents.contains(&("foo", 1)));
        assert!(!idents.contains(&("bar", 2)));
    }

    #[test]
    fn test_object_keys_are_identifiers() {
        let tree = lower_ts("const o = {\n  foo: handler,\n  'bar': 1,\n};\n");
        let idents: Vec<_> = collect(&tree, |n| matches!(n, Node::Identifier(_)))
            .into_iter()
            .filter_map(|n| match n {
                Node::Identifier(id) => Some((id.name.as_str(), id.line)),
                _ => None,
            })
            .collect();
        assert_eq!(idents, vec![("foo", 2), ("handler", 2)]);
    }

    #[test]
    fn test_class_names_are_not_declarations() {
        let tree = lower_ts("class Foo {}\n");
        assert!(collect(&tree, |n| matches!(n, Node::Declaration(_))).is_empty());
        let idents = collect(&tree, |n| matches!(n, Node::Identifier(_)));
        assert!(matches!(&idents[..], [Node::Identifier(id)] if id.name == "Foo" && id.line == 1));
    }

    #[test]
    fn test_comments_are_dropped() {
        let tree = lower_ts("// foo\n/* foo */\n");
        assert!(collect(&tree, |n| matches!(n, Node::Identifier(_))).is_empty());
    }
}
