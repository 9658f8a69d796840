//! Local, single-file type attribution.
//!
//! Records the declared types of locals, parameters, fields, and catch
//! parameters, keyed by the byte range of their enclosing scope. Lookups
//! resolve lexically, innermost scope first. Anything not provable from the
//! file alone resolves to None, and recipes treat None as "do not transform".

use crate::tree::{node_text, preorder, unwrap_parens};
use tree_sitter::{Node, Tree};

#[derive(Debug)]
struct Binding {
    name: String,
    /// Declared type text, e.g. `List<String>` or `int`.
    ty: String,
    scope_start: usize,
    scope_end: usize,
}

/// Declared types visible at each point of a file.
#[derive(Debug, Default)]
pub struct TypeScope {
    bindings: Vec<Binding>,
}

/// Nodes that delimit a lexical scope for bindings declared inside them.
const SCOPE_KINDS: &[&str] = &[
    "block",
    "class_body",
    "interface_body",
    "enum_body",
    "method_declaration",
    "constructor_declaration",
    "lambda_expression",
    "for_statement",
    "enhanced_for_statement",
    "catch_clause",
    "program",
];

fn enclosing_scope(node: Node<'_>) -> (usize, usize) {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if SCOPE_KINDS.contains(&parent.kind()) {
            return (parent.start_byte(), parent.end_byte());
        }
        current = parent;
    }
    (0, usize::MAX)
}

impl TypeScope {
    /// Collect declared types from a parsed file.
    pub fn build(tree: &Tree, source: &str) -> Self {
        let mut bindings = Vec::new();

        for node in preorder(tree).filter(|n| n.is_named()) {
            match node.kind() {
                "local_variable_declaration" | "field_declaration" => {
                    let Some(ty) = node.child_by_field_name("type") else {
                        continue;
                    };
                    let ty_text = node_text(ty, source);
                    if ty_text == "var" {
                        continue;
                    }
                    let (scope_start, scope_end) = enclosing_scope(node);
                    let mut cursor = node.walk();
                    for decl in node.children_by_field_name("declarator", &mut cursor) {
                        if let Some(name) = decl.child_by_field_name("name") {
                            bindings.push(Binding {
                                name: node_text(name, source).to_string(),
                                ty: ty_text.to_string(),
                                scope_start,
                                scope_end,
                            });
                        }
                    }
                }
                "formal_parameter" | "catch_formal_parameter" => {
                    let (Some(ty), Some(name)) = (
                        node.child_by_field_name("type"),
                        node.child_by_field_name("name"),
                    ) else {
                        continue;
                    };
                    let (scope_start, scope_end) = enclosing_scope(node);
                    bindings.push(Binding {
                        name: node_text(name, source).to_string(),
                        ty: node_text(ty, source).to_string(),
                        scope_start,
                        scope_end,
                    });
                }
                "enhanced_for_statement" => {
                    let (Some(ty), Some(name)) = (
                        node.child_by_field_name("type"),
                        node.child_by_field_name("name"),
                    ) else {
                        continue;
                    };
                    let ty_text = node_text(ty, source);
                    if ty_text == "var" {
                        continue;
                    }
                    bindings.push(Binding {
                        name: node_text(name, source).to_string(),
                        ty: ty_text.to_string(),
                        scope_start: node.start_byte(),
                        scope_end: node.end_byte(),
                    });
                }
                _ => {}
            }
        }

        Self { bindings }
    }

    /// Declared type text of an expression, if it can be proven locally.
    pub fn type_of(&self, node: Node<'_>, source: &str) -> Option<String> {
        let node = unwrap_parens(node);
        match node.kind() {
            "string_literal" => Some("String".to_string()),
            "object_creation_expression" => {
                let ty = node.child_by_field_name("type")?;
                Some(node_text(ty, source).to_string())
            }
            "cast_expression" => {
                let ty = node.child_by_field_name("type")?;
                Some(node_text(ty, source).to_string())
            }
            "identifier" => self.lookup(node_text(node, source), node.start_byte()),
            "field_access" => {
                // Only `this.x` resolves; arbitrary paths need cross-file info.
                let object = node.child_by_field_name("object")?;
                if object.kind() != "this" {
                    return None;
                }
                let field = node.child_by_field_name("field")?;
                self.lookup(node_text(field, source), node.start_byte())
            }
            _ => None,
        }
    }

    /// Like `type_of`, but reduced to the simple base name: generics and
    /// package qualifiers stripped, e.g. `java.util.List<String>` -> `List`.
    pub fn base_type_of(&self, node: Node<'_>, source: &str) -> Option<String> {
        self.type_of(node, source).map(|ty| base_name(&ty))
    }

    fn lookup(&self, name: &str, at: usize) -> Option<String> {
        self.bindings
            .iter()
            .filter(|b| b.name == name && b.scope_start <= at && at < b.scope_end)
            .max_by_key(|b| b.scope_start)
            .map(|b| b.ty.clone())
    }
}

/// Simple base name of a type: `java.util.List<String>[]` -> `List`.
pub fn base_name(ty: &str) -> String {
    let ty = ty.split('<').next().unwrap_or(ty);
    let ty = ty.trim_end_matches("[]").trim();
    ty.rsplit('.').next().unwrap_or(ty).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;

    fn type_at(source: &str, name: &str) -> Option<String> {
        let tree = parse(source).unwrap();
        let scope = TypeScope::build(&tree, source);
        // Resolve the *last* occurrence, i.e. a use rather than the declaration.
        let node = preorder(&tree)
            .filter(|n| n.kind() == "identifier" && node_text(*n, source) == name)
            .last()
            .unwrap();
        scope.base_type_of(node, source)
    }

    #[test]
    fn resolves_locals_and_parameters() {
        let source = r#"
class A {
    void f(String s) {
        java.util.List<String> names = null;
        use(s);
        use(names);
    }
}
"#;
        assert_eq!(type_at(source, "s").as_deref(), Some("String"));
        assert_eq!(type_at(source, "names").as_deref(), Some("List"));
    }

    #[test]
    fn resolves_fields_through_class_scope() {
        let source = r#"
class A {
    private Map<String, Integer> counts;

    void f() {
        use(counts);
    }
}
"#;
        assert_eq!(type_at(source, "counts").as_deref(), Some("Map"));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let source = r#"
class A {
    private String x;

    void f() {
        int x = 0;
        use(x);
    }
}
"#;
        assert_eq!(type_at(source, "x").as_deref(), Some("int"));
    }

    #[test]
    fn unknown_names_fail_closed() {
        let source = "class A { void f() { use(mystery); } }";
        assert_eq!(type_at(source, "mystery"), None);
    }

    #[test]
    fn string_literals_are_strings() {
        let source = r#"class A { void f() { use("hi"); } }"#;
        let tree = parse(source).unwrap();
        let scope = TypeScope::build(&tree, source);
        let lit = preorder(&tree)
            .find(|n| n.kind() == "string_literal")
            .unwrap();
        assert_eq!(scope.base_type_of(lit, source).as_deref(), Some("String"));
    }
}
