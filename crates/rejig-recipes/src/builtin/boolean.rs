//! Boolean expression simplifications.

use crate::{Recipe, RewriteContext};
use tree_sitter::Node;

/// Expression kinds that stay unambiguous when a `!` is prefixed or when the
/// expression is lifted out of a comparison without extra parentheses.
fn is_simple_operand(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "identifier" | "field_access" | "method_invocation" | "parenthesized_expression"
    )
}

fn bool_literal(node: Node<'_>) -> Option<bool> {
    match node.kind() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// `x == true` -> `x`, `x != false` -> `x`, `x == false` / `x != true` -> `!x`.
pub struct BooleanLiteralComparison;

impl Recipe for BooleanLiteralComparison {
    fn id(&self) -> &'static str {
        "cleanup/boolean-literal-comparison"
    }

    fn description(&self) -> &'static str {
        "Drop comparisons against boolean literals"
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
        let equals = match ctx.text(op) {
            "==" => true,
            "!=" => false,
            _ => return,
        };
        let (literal, other) = match (bool_literal(left), bool_literal(right)) {
            (Some(lit), None) => (lit, right),
            (None, Some(lit)) => (lit, left),
            _ => return,
        };
        if !is_simple_operand(other) {
            return;
        }
        let text = ctx.text(other);
        if equals == literal {
            ctx.replace(node, text);
        } else {
            ctx.replace(node, format!("!{text}"));
        }
    }
}

/// `c ? true : false` -> `c`, `c ? false : true` -> `!c`.
pub struct TernaryBooleanLiterals;

impl Recipe for TernaryBooleanLiterals {
    fn id(&self) -> &'static str {
        "cleanup/ternary-boolean-literals"
    }

    fn description(&self) -> &'static str {
        "Replace ternaries that only select boolean literals"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "ternary_expression" {
            return;
        }
        let (Some(condition), Some(consequence), Some(alternative)) = (
            node.child_by_field_name("condition"),
            node.child_by_field_name("consequence"),
            node.child_by_field_name("alternative"),
        ) else {
            return;
        };
        let (Some(when_true), Some(when_false)) =
            (bool_literal(consequence), bool_literal(alternative))
        else {
            return;
        };
        let text = ctx.text(condition);
        match (when_true, when_false) {
            (true, false) => ctx.replace(node, text),
            (false, true) => {
                if is_simple_operand(condition) {
                    ctx.replace(node, format!("!{text}"));
                } else {
                    ctx.replace(node, format!("!({text})"));
                }
            }
            _ => {}
        }
    }
}

/// `!!x` -> `x`, including `!(!x)`.
pub struct DoubleNegation;

impl Recipe for DoubleNegation {
    fn id(&self) -> &'static str {
        "cleanup/double-negation"
    }

    fn description(&self) -> &'static str {
        "Remove doubled logical negation"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "unary_expression" {
            return;
        }
        let (Some(op), Some(operand)) = (
            node.child_by_field_name("operator"),
            node.child_by_field_name("operand"),
        ) else {
            return;
        };
        if ctx.text(op) != "!" {
            return;
        }
        let inner = rejig_core::unwrap_parens(operand);
        if inner.kind() != "unary_expression" {
            return;
        }
        let (Some(inner_op), Some(inner_operand)) = (
            inner.child_by_field_name("operator"),
            inner.child_by_field_name("operand"),
        ) else {
            return;
        };
        if ctx.text(inner_op) != "!" {
            return;
        }
        ctx.replace(node, ctx.text(inner_operand).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_unchanged, rewrite};

    #[test]
    fn drops_comparison_with_true() {
        let before = "class A { void f(boolean b) { if (b == true) { g(); } } }";
        let after = "class A { void f(boolean b) { if (b) { g(); } } }";
        assert_eq!(rewrite(Box::new(BooleanLiteralComparison), before), after);
    }

    #[test]
    fn negates_comparison_with_false() {
        let before = "class A { void f() { if (isReady() == false) { g(); } } }";
        let after = "class A { void f() { if (!isReady()) { g(); } } }";
        assert_eq!(rewrite(Box::new(BooleanLiteralComparison), before), after);
    }

    #[test]
    fn not_equal_true_negates() {
        let before = "class A { void f(boolean b) { while (b != true) { g(); } } }";
        let after = "class A { void f(boolean b) { while (!b) { g(); } } }";
        assert_eq!(rewrite(Box::new(BooleanLiteralComparison), before), after);
    }

    #[test]
    fn compound_operand_is_left_alone() {
        // `a && b == true` parses the comparison over `b` only; the match on a
        // whole `&&` expression against a literal never fires.
        assert_unchanged(
            Box::new(BooleanLiteralComparison),
            "class A { void f(int x) { if (x + 1 == 2) { g(); } } }",
        );
    }

    #[test]
    fn folds_identity_ternary() {
        let before = "class A { boolean f(int x) { return x > 0 ? true : false; } }";
        let after = "class A { boolean f(int x) { return x > 0; } }";
        assert_eq!(rewrite(Box::new(TernaryBooleanLiterals), before), after);
    }

    #[test]
    fn folds_inverted_ternary_with_parens() {
        let before = "class A { boolean f(int x) { return x > 0 ? false : true; } }";
        let after = "class A { boolean f(int x) { return !(x > 0); } }";
        assert_eq!(rewrite(Box::new(TernaryBooleanLiterals), before), after);
    }

    #[test]
    fn folds_inverted_ternary_simple_condition() {
        let before = "class A { boolean f(boolean b) { return b ? false : true; } }";
        let after = "class A { boolean f(boolean b) { return !b; } }";
        assert_eq!(rewrite(Box::new(TernaryBooleanLiterals), before), after);
    }

    #[test]
    fn value_selecting_ternary_is_left_alone() {
        assert_unchanged(
            Box::new(TernaryBooleanLiterals),
            "class A { int f(boolean b) { return b ? 1 : 0; } }",
        );
    }

    #[test]
    fn removes_double_negation() {
        let before = "class A { boolean f(boolean b) { return !!b; } }";
        let after = "class A { boolean f(boolean b) { return b; } }";
        assert_eq!(rewrite(Box::new(DoubleNegation), before), after);
    }

    #[test]
    fn removes_parenthesized_double_negation() {
        let before = "class A { boolean f(boolean b) { return !(!b); } }";
        let after = "class A { boolean f(boolean b) { return b; } }";
        assert_eq!(rewrite(Box::new(DoubleNegation), before), after);
    }

    #[test]
    fn single_negation_is_kept() {
        assert_unchanged(
            Box::new(DoubleNegation),
            "class A { boolean f(boolean b) { return !b; } }",
        );
    }
}
