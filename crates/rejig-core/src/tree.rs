//! Java parsing helpers on top of tree-sitter.
//!
//! The tree-sitter CST is lossless over the source text: every byte of the
//! original file is covered by some node, so rewrites expressed as byte-range
//! splices preserve all formatting and comments outside the replaced range.

use tree_sitter::{Node, Parser, Tree};

/// Create a parser configured for Java.
pub fn parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .expect("load java grammar");
    parser
}

/// Parse a Java source string. Returns None if the parser gives up entirely;
/// partial trees with error nodes are returned (callers check `has_error`).
pub fn parse(source: &str) -> Option<Tree> {
    parser().parse(source, None)
}

/// Text of a node, sliced out of the original source.
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Strip `parenthesized_expression` wrappers, e.g. `((x))` -> `x`.
pub fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|c| !is_comment(*c));
        match inner {
            Some(n) => node = n,
            None => break,
        }
    }
    node
}

/// Is this node a line or block comment?
pub fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// Named, non-comment children of a node (e.g. the arguments of an
/// `argument_list`, or the statements of a `block` minus its comments).
pub fn significant_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(*c))
        .collect()
}

/// Byte offset of the start of the line containing `byte`.
pub fn line_start(source: &str, byte: usize) -> usize {
    source[..byte].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Visit every node of a tree in preorder (anonymous tokens included).
pub fn preorder(tree: &Tree) -> Preorder<'_> {
    Preorder {
        cursor: tree.root_node().walk(),
        done: false,
    }
}

/// Preorder traversal over a tree, driven by a `TreeCursor`.
pub struct Preorder<'t> {
    cursor: tree_sitter::TreeCursor<'t>,
    done: bool,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_java() {
        let tree = parse("class A { void f() {} }").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn preorder_visits_every_named_node() {
        let source = "class A { int x = 1; }";
        let tree = parse(source).unwrap();
        let kinds: Vec<&str> = preorder(&tree)
            .filter(|n| n.is_named())
            .map(|n| n.kind())
            .collect();
        assert!(kinds.contains(&"class_declaration"));
        assert!(kinds.contains(&"field_declaration"));
        assert!(kinds.contains(&"decimal_integer_literal"));
    }

    #[test]
    fn unwraps_nested_parens() {
        let source = "class A { boolean f() { return ((x)); } }";
        let tree = parse(source).unwrap();
        let paren = preorder(&tree)
            .find(|n| n.kind() == "parenthesized_expression")
            .unwrap();
        let inner = unwrap_parens(paren);
        assert_eq!(inner.kind(), "identifier");
        assert_eq!(node_text(inner, source), "x");
    }
}
