//! Boxed-value construction and numeric literal cleanups.

use crate::{Recipe, RewriteContext};
use rejig_core::{significant_children, unwrap_parens};
use tree_sitter::Node;

/// The single argument of a `new T(arg)` expression with no anonymous class
/// body, if there is exactly one.
fn sole_constructor_arg<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let args = node.child_by_field_name("arguments")?;
    let mut cursor = node.walk();
    if node.children(&mut cursor).any(|c| c.kind() == "class_body") {
        return None;
    }
    let args = significant_children(args);
    match args.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn is_floating_literal(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "decimal_floating_point_literal" | "hex_floating_point_literal"
    )
}

fn is_integer_literal(kind: &str) -> bool {
    matches!(
        kind,
        "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
    )
}

/// `new BigDecimal(0.1)` -> `BigDecimal.valueOf(0.1)`.
///
/// The double constructor bakes the binary approximation of the literal into
/// the decimal value; `valueOf` goes through the string form instead. Only
/// fires when the argument is provably a double or float.
pub struct BigDecimalDoubleConstructor;

impl Recipe for BigDecimalDoubleConstructor {
    fn id(&self) -> &'static str {
        "cleanup/bigdecimal-double-constructor"
    }

    fn description(&self) -> &'static str {
        "Use BigDecimal.valueOf instead of the double constructor"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "object_creation_expression" {
            return;
        }
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        let ty_text = ctx.text(ty);
        if ty_text != "BigDecimal" && ty_text != "java.math.BigDecimal" {
            return;
        }
        let Some(arg) = sole_constructor_arg(node) else {
            return;
        };
        let mut value = unwrap_parens(arg);
        if value.kind() == "unary_expression" {
            let Some(operand) = value.child_by_field_name("operand") else {
                return;
            };
            value = unwrap_parens(operand);
        }
        let floating = is_floating_literal(value)
            || matches!(
                ctx.base_type(arg).as_deref(),
                Some("double" | "float" | "Double" | "Float")
            );
        if !floating {
            return;
        }
        ctx.replace(node, format!("{}.valueOf({})", ty_text, ctx.text(arg)));
    }
}

const WRAPPERS: &[&str] = &[
    "Boolean", "Byte", "Character", "Double", "Float", "Integer", "Long", "Short",
];

/// `new Integer(5)` -> `Integer.valueOf(5)` for all primitive wrappers.
pub struct PrimitiveWrapperConstructor;

impl Recipe for PrimitiveWrapperConstructor {
    fn id(&self) -> &'static str {
        "cleanup/primitive-wrapper-constructor"
    }

    fn description(&self) -> &'static str {
        "Replace deprecated wrapper constructors with valueOf"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "object_creation_expression" {
            return;
        }
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        let ty_text = ctx.text(ty);
        if !WRAPPERS.contains(&ty_text) {
            return;
        }
        let Some(arg) = sole_constructor_arg(node) else {
            return;
        };
        // Character.valueOf has no String overload, unlike the other wrappers.
        if ty_text == "Character" && unwrap_parens(arg).kind() == "string_literal" {
            return;
        }
        ctx.replace(node, format!("{}.valueOf({})", ty_text, ctx.text(arg)));
    }
}

/// `10000000l` -> `10000000L`.
pub struct LongLiteralUppercaseSuffix;

impl Recipe for LongLiteralUppercaseSuffix {
    fn id(&self) -> &'static str {
        "cleanup/long-literal-uppercase-suffix"
    }

    fn description(&self) -> &'static str {
        "Write long literal suffixes as uppercase L"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if !is_integer_literal(node.kind()) {
            return;
        }
        if ctx.text(node).ends_with('l') {
            let end = node.end_byte();
            ctx.replace_range(end - 1, end, "L");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_unchanged, rewrite};

    #[test]
    fn bigdecimal_from_double_literal() {
        let before = "class A { Object f() { return new BigDecimal(0.1); } }";
        let after = "class A { Object f() { return BigDecimal.valueOf(0.1); } }";
        assert_eq!(rewrite(Box::new(BigDecimalDoubleConstructor), before), after);
    }

    #[test]
    fn bigdecimal_from_negative_literal() {
        let before = "class A { Object f() { return new BigDecimal(-2.5); } }";
        let after = "class A { Object f() { return BigDecimal.valueOf(-2.5); } }";
        assert_eq!(rewrite(Box::new(BigDecimalDoubleConstructor), before), after);
    }

    #[test]
    fn bigdecimal_from_double_variable() {
        let before = "class A { Object f(double d) { return new BigDecimal(d); } }";
        let after = "class A { Object f(double d) { return BigDecimal.valueOf(d); } }";
        assert_eq!(rewrite(Box::new(BigDecimalDoubleConstructor), before), after);
    }

    #[test]
    fn bigdecimal_from_string_is_kept() {
        // The string constructor is exact; nothing to fix.
        assert_unchanged(
            Box::new(BigDecimalDoubleConstructor),
            r#"class A { Object f() { return new BigDecimal("0.1"); } }"#,
        );
    }

    #[test]
    fn bigdecimal_from_unknown_variable_is_kept() {
        assert_unchanged(
            Box::new(BigDecimalDoubleConstructor),
            "class A { Object f() { return new BigDecimal(value); } }",
        );
    }

    #[test]
    fn wrapper_constructors_become_value_of() {
        let before = "class A { Object f() { return new Integer(42); } }";
        let after = "class A { Object f() { return Integer.valueOf(42); } }";
        assert_eq!(rewrite(Box::new(PrimitiveWrapperConstructor), before), after);
    }

    #[test]
    fn boolean_from_string_is_converted() {
        let before = r#"class A { Object f() { return new Boolean("true"); } }"#;
        let after = r#"class A { Object f() { return Boolean.valueOf("true"); } }"#;
        assert_eq!(rewrite(Box::new(PrimitiveWrapperConstructor), before), after);
    }

    #[test]
    fn character_from_string_is_kept() {
        assert_unchanged(
            Box::new(PrimitiveWrapperConstructor),
            r#"class A { Object f() { return new Character("a"); } }"#,
        );
    }

    #[test]
    fn anonymous_subclass_is_kept() {
        assert_unchanged(
            Box::new(PrimitiveWrapperConstructor),
            "class A { Object f() { return new Integer(5) { }; } }",
        );
    }

    #[test]
    fn lowercase_long_suffix_is_uppercased() {
        let before = "class A { long x = 10000000l; long y = 0x1fl; }";
        let after = "class A { long x = 10000000L; long y = 0x1fL; }";
        assert_eq!(rewrite(Box::new(LongLiteralUppercaseSuffix), before), after);
    }

    #[test]
    fn uppercase_suffix_is_kept() {
        assert_unchanged(
            Box::new(LongLiteralUppercaseSuffix),
            "class A { long x = 10000000L; int y = 41; }",
        );
    }
}
