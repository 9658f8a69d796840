//! Collection and sequence idiom cleanups.

use crate::{Recipe, RewriteContext};
use rejig_core::significant_children;
use tree_sitter::Node;

/// A one-argument or zero-argument call `recv.name(..)`, decomposed.
struct Call<'t> {
    receiver: Node<'t>,
    name: String,
    args: Vec<Node<'t>>,
}

fn decompose_call<'t>(node: Node<'t>, ctx: &RewriteContext<'_>) -> Option<Call<'t>> {
    if node.kind() != "method_invocation" {
        return None;
    }
    let receiver = node.child_by_field_name("object")?;
    let name = node.child_by_field_name("name")?;
    let args = node.child_by_field_name("arguments")?;
    Some(Call {
        receiver,
        name: ctx.text(name).to_string(),
        args: significant_children(args),
    })
}

/// Flip a comparison operator as if its operands swapped sides.
fn flip_operator(op: &str) -> &str {
    match op {
        "<" => ">",
        "<=" => ">=",
        ">" => "<",
        ">=" => "<=",
        other => other,
    }
}

const INDEXOF_RECEIVERS: &[&str] = &[
    "String",
    "CharSequence",
    "List",
    "ArrayList",
    "LinkedList",
    "Vector",
];

/// `s.indexOf(x) >= 0` -> `s.contains(x)` and the negated variants.
pub struct IndexOfToContains;

impl Recipe for IndexOfToContains {
    fn id(&self) -> &'static str {
        "cleanup/indexof-to-contains"
    }

    fn description(&self) -> &'static str {
        "Use contains instead of comparing indexOf to a sentinel"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "binary_expression" {
            return;
        }
        let (Some(left), Some(op), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        // Normalize so the indexOf call sits on the left.
        let (call_node, op_text, literal) = if left.kind() == "method_invocation" {
            (left, ctx.text(op).to_string(), right)
        } else if right.kind() == "method_invocation" {
            (right, flip_operator(ctx.text(op)).to_string(), left)
        } else {
            return;
        };
        let Some(call) = decompose_call(call_node, ctx) else {
            return;
        };
        if call.name != "indexOf" || call.args.len() != 1 {
            return;
        }
        let negated = match (op_text.as_str(), ctx.text(literal)) {
            (">=", "0") | (">", "-1") | ("!=", "-1") => false,
            ("<", "0") | ("==", "-1") | ("<=", "-1") => true,
            _ => return,
        };
        let Some(receiver_type) = ctx.base_type(call.receiver) else {
            return;
        };
        if !INDEXOF_RECEIVERS.contains(&receiver_type.as_str()) {
            return;
        }
        // String.contains takes a CharSequence; indexOf also accepts a char.
        if matches!(receiver_type.as_str(), "String" | "CharSequence") {
            let arg = call.args[0];
            let arg_is_sequence = arg.kind() == "string_literal"
                || matches!(
                    ctx.base_type(arg).as_deref(),
                    Some("String" | "CharSequence")
                );
            if !arg_is_sequence {
                return;
            }
        }
        let contains = format!(
            "{}.contains({})",
            ctx.text(call.receiver),
            ctx.text(call.args[0])
        );
        if negated {
            ctx.replace(node, format!("!{contains}"));
        } else {
            ctx.replace(node, contains);
        }
    }
}

const SIZE_RECEIVERS: &[&str] = &[
    "Collection",
    "List",
    "ArrayList",
    "LinkedList",
    "Vector",
    "Set",
    "HashSet",
    "TreeSet",
    "LinkedHashSet",
    "Map",
    "HashMap",
    "TreeMap",
    "LinkedHashMap",
    "Deque",
    "ArrayDeque",
    "Queue",
];

const LENGTH_RECEIVERS: &[&str] = &["String", "CharSequence", "StringBuilder", "StringBuffer"];

/// `list.size() == 0` -> `list.isEmpty()` and the negated variants, for
/// collections (`size`) and character sequences (`length`).
pub struct UseIsEmpty;

impl Recipe for UseIsEmpty {
    fn id(&self) -> &'static str {
        "cleanup/use-is-empty"
    }

    fn description(&self) -> &'static str {
        "Use isEmpty instead of comparing size or length to zero"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "binary_expression" {
            return;
        }
        let (Some(left), Some(op), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        let (call_node, op_text, literal) = if left.kind() == "method_invocation" {
            (left, ctx.text(op).to_string(), right)
        } else if right.kind() == "method_invocation" {
            (right, flip_operator(ctx.text(op)).to_string(), left)
        } else {
            return;
        };
        let Some(call) = decompose_call(call_node, ctx) else {
            return;
        };
        if !call.args.is_empty() {
            return;
        }
        let allowed: &[&str] = match call.name.as_str() {
            "size" => SIZE_RECEIVERS,
            "length" => LENGTH_RECEIVERS,
            _ => return,
        };
        let negated = match (op_text.as_str(), ctx.text(literal)) {
            ("==", "0") | ("<", "1") | ("<=", "0") => false,
            ("!=", "0") | (">", "0") | (">=", "1") => true,
            _ => return,
        };
        let Some(receiver_type) = ctx.base_type(call.receiver) else {
            return;
        };
        if !allowed.contains(&receiver_type.as_str()) {
            return;
        }
        let is_empty = format!("{}.isEmpty()", ctx.text(call.receiver));
        if negated {
            ctx.replace(node, format!("!{is_empty}"));
        } else {
            ctx.replace(node, is_empty);
        }
    }
}

/// Literal kinds `List.of` accepts without a behavior change.
fn is_non_null_literal(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "string_literal"
            | "character_literal"
            | "true"
            | "false"
    )
}

/// `Arrays.asList("a", "b")` -> `List.of("a", "b")` when every element is a
/// non-null literal. `List.of` rejects nulls and returns a truly immutable
/// list, so anything less provable is left alone.
pub struct ArraysAsListToListOf;

impl Recipe for ArraysAsListToListOf {
    fn id(&self) -> &'static str {
        "migrate/arrays-aslist-to-listof"
    }

    fn description(&self) -> &'static str {
        "Use List.of for literal-only Arrays.asList calls"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["migrate", "java9"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "method_invocation" {
            return;
        }
        let (Some(object), Some(name), Some(args)) = (
            node.child_by_field_name("object"),
            node.child_by_field_name("name"),
            node.child_by_field_name("arguments"),
        ) else {
            return;
        };
        let object_text = ctx.text(object);
        if object_text != "Arrays" && object_text != "java.util.Arrays" {
            return;
        }
        if ctx.text(name) != "asList" {
            return;
        }
        // Explicit type witnesses change inference; keep them as written.
        if node.child_by_field_name("type_arguments").is_some() {
            return;
        }
        if !significant_children(args).iter().all(|a| is_non_null_literal(*a)) {
            return;
        }
        ctx.replace_range(node.start_byte(), args.start_byte(), "List.of");
        ctx.add_import("java.util.List");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_unchanged, rewrite};

    #[test]
    fn indexof_sentinel_becomes_contains() {
        let before =
            "class A { boolean f(String s) { return s.indexOf(\"x\") >= 0; } }";
        let after = "class A { boolean f(String s) { return s.contains(\"x\"); } }";
        assert_eq!(rewrite(Box::new(IndexOfToContains), before), after);
    }

    #[test]
    fn negative_sentinel_negates_contains() {
        let before = "class A { boolean f(String s) { return s.indexOf(\"x\") == -1; } }";
        let after = "class A { boolean f(String s) { return !s.contains(\"x\"); } }";
        assert_eq!(rewrite(Box::new(IndexOfToContains), before), after);
    }

    #[test]
    fn flipped_operands_are_normalized() {
        let before = "class A { boolean f(String s) { return 0 <= s.indexOf(\"x\"); } }";
        let after = "class A { boolean f(String s) { return s.contains(\"x\"); } }";
        assert_eq!(rewrite(Box::new(IndexOfToContains), before), after);
    }

    #[test]
    fn positional_indexof_use_is_kept() {
        // `> 0` excludes a match at index zero; not a containment test.
        assert_unchanged(
            Box::new(IndexOfToContains),
            "class A { boolean f(String s) { return s.indexOf(\"x\") > 0; } }",
        );
    }

    #[test]
    fn char_argument_on_string_is_kept() {
        // contains has no char overload; the rewrite would not compile.
        assert_unchanged(
            Box::new(IndexOfToContains),
            "class A { boolean f(String s) { return s.indexOf('x') >= 0; } }",
        );
    }

    #[test]
    fn string_argument_from_variable_still_matches() {
        let before =
            "class A { boolean f(String s, String n) { return s.indexOf(n) >= 0; } }";
        let after = "class A { boolean f(String s, String n) { return s.contains(n); } }";
        assert_eq!(rewrite(Box::new(IndexOfToContains), before), after);
    }

    #[test]
    fn char_argument_on_list_still_matches() {
        // List.contains takes Object, so the char boxes fine either way.
        let before = "class A { boolean f(List<Character> l) { return l.indexOf('x') >= 0; } }";
        let after = "class A { boolean f(List<Character> l) { return l.contains('x'); } }";
        assert_eq!(rewrite(Box::new(IndexOfToContains), before), after);
    }

    #[test]
    fn unknown_receiver_type_is_kept() {
        assert_unchanged(
            Box::new(IndexOfToContains),
            "class A { boolean f() { return lookup().indexOf(\"x\") >= 0; } }",
        );
    }

    #[test]
    fn size_zero_becomes_is_empty() {
        let before =
            "class A { boolean f(java.util.List<String> l) { return l.size() == 0; } }";
        let after = "class A { boolean f(java.util.List<String> l) { return l.isEmpty(); } }";
        assert_eq!(rewrite(Box::new(UseIsEmpty), before), after);
    }

    #[test]
    fn size_greater_than_zero_negates() {
        let before = "class A { boolean f(Map<String, Integer> m) { return m.size() > 0; } }";
        let after = "class A { boolean f(Map<String, Integer> m) { return !m.isEmpty(); } }";
        assert_eq!(rewrite(Box::new(UseIsEmpty), before), after);
    }

    #[test]
    fn string_length_also_matches() {
        let before = "class A { boolean f(String s) { return s.length() == 0; } }";
        let after = "class A { boolean f(String s) { return s.isEmpty(); } }";
        assert_eq!(rewrite(Box::new(UseIsEmpty), before), after);
    }

    #[test]
    fn size_on_unknown_type_is_kept() {
        assert_unchanged(
            Box::new(UseIsEmpty),
            "class A { boolean f(Matrix m) { return m.size() == 0; } }",
        );
    }

    #[test]
    fn size_compared_to_two_is_kept() {
        assert_unchanged(
            Box::new(UseIsEmpty),
            "class A { boolean f(List<String> l) { return l.size() == 2; } }",
        );
    }

    #[test]
    fn literal_aslist_becomes_list_of() {
        let before = r#"
import java.util.Arrays;

class A {
    Object f() {
        return Arrays.asList("a", "b", "c");
    }
}
"#;
        let out = rewrite(Box::new(ArraysAsListToListOf), before);
        assert!(out.contains(r#"List.of("a", "b", "c")"#));
        assert!(out.contains("import java.util.List;"));
        // The stale Arrays import belongs to the unused-import recipe.
        assert!(out.contains("import java.util.Arrays;"));
    }

    #[test]
    fn aslist_with_variables_is_kept() {
        assert_unchanged(
            Box::new(ArraysAsListToListOf),
            "class A { Object f(String x) { return Arrays.asList(x, \"b\"); } }",
        );
    }

    #[test]
    fn aslist_with_null_is_kept() {
        // List.of throws on null elements.
        assert_unchanged(
            Box::new(ArraysAsListToListOf),
            "class A { Object f() { return Arrays.asList(\"a\", null); } }",
        );
    }
}
