//! String comparison and construction cleanups.

use crate::{Recipe, RewriteContext};
use rejig_core::{significant_children, unwrap_parens};
use tree_sitter::Node;

fn is_reference_operand(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "identifier" | "field_access" | "method_invocation" | "parenthesized_expression"
    )
}

/// A zero-argument `recv.name()` call, returning `(recv, name-text)`.
fn zero_arg_call<'t>(node: Node<'t>, ctx: &RewriteContext<'_>) -> Option<(Node<'t>, String)> {
    if node.kind() != "method_invocation" {
        return None;
    }
    let object = node.child_by_field_name("object")?;
    let name = node.child_by_field_name("name")?;
    let args = node.child_by_field_name("arguments")?;
    if !significant_children(args).is_empty() {
        return None;
    }
    Some((object, ctx.text(name).to_string()))
}

/// `s == "x"` -> `"x".equals(s)` when `s` is provably a String.
pub struct StringLiteralEquality;

impl Recipe for StringLiteralEquality {
    fn id(&self) -> &'static str {
        "cleanup/string-literal-equality"
    }

    fn description(&self) -> &'static str {
        "Compare strings against literals with equals, not =="
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
        let (literal, other) = if left.kind() == "string_literal" {
            (left, right)
        } else if right.kind() == "string_literal" {
            (right, left)
        } else {
            return;
        };
        if !is_reference_operand(other) && other.kind() != "string_literal" {
            return;
        }
        // Reference identity on a non-String operand is not an equals call.
        if ctx.base_type(other).as_deref() != Some("String") {
            return;
        }
        let call = format!("{}.equals({})", ctx.text(literal), ctx.text(other));
        if equals {
            ctx.replace(node, call);
        } else {
            ctx.replace(node, format!("!{call}"));
        }
    }
}

/// `s.equals("x")` -> `"x".equals(s)`, so a null `s` yields false instead of
/// throwing. Also covers `equalsIgnoreCase`.
pub struct EqualsAvoidsNull;

impl Recipe for EqualsAvoidsNull {
    fn id(&self) -> &'static str {
        "cleanup/equals-avoids-null"
    }

    fn description(&self) -> &'static str {
        "Put the string literal on the receiver side of equals"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
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
        let name_text = ctx.text(name);
        if name_text != "equals" && name_text != "equalsIgnoreCase" {
            return;
        }
        if !matches!(object.kind(), "identifier" | "field_access") {
            return;
        }
        // Flipping the call only preserves behavior for String.equals.
        if ctx.base_type(object).as_deref() != Some("String") {
            return;
        }
        let args = significant_children(args);
        let [arg] = args.as_slice() else {
            return;
        };
        if arg.kind() != "string_literal" {
            return;
        }
        ctx.replace(
            node,
            format!("{}.{}({})", ctx.text(*arg), name_text, ctx.text(object)),
        );
    }
}

/// `a.toLowerCase().equals(b.toLowerCase())` -> `a.equalsIgnoreCase(b)`.
pub struct UseEqualsIgnoreCase;

impl Recipe for UseEqualsIgnoreCase {
    fn id(&self) -> &'static str {
        "cleanup/use-equals-ignore-case"
    }

    fn description(&self) -> &'static str {
        "Use equalsIgnoreCase instead of case-folding both sides"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
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
        if ctx.text(name) != "equals" {
            return;
        }
        let args = significant_children(args);
        let [arg] = args.as_slice() else {
            return;
        };
        let (Some((left, left_case)), Some((right, right_case))) = (
            zero_arg_call(object, ctx),
            zero_arg_call(unwrap_parens(*arg), ctx),
        ) else {
            return;
        };
        // Both sides must fold in the same direction.
        if left_case != right_case
            || !matches!(left_case.as_str(), "toLowerCase" | "toUpperCase")
        {
            return;
        }
        // Other types may define their own toLowerCase without an
        // equalsIgnoreCase counterpart.
        if ctx.base_type(left).as_deref() != Some("String")
            || ctx.base_type(right).as_deref() != Some("String")
        {
            return;
        }
        ctx.replace(
            node,
            format!("{}.equalsIgnoreCase({})", ctx.text(left), ctx.text(right)),
        );
    }
}

/// `new String("x")` -> `"x"`, `new String()` -> `""`.
pub struct RedundantStringConstructor;

impl Recipe for RedundantStringConstructor {
    fn id(&self) -> &'static str {
        "cleanup/redundant-string-constructor"
    }

    fn description(&self) -> &'static str {
        "Drop String constructors that copy a literal"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "object_creation_expression" {
            return;
        }
        let (Some(ty), Some(args)) = (
            node.child_by_field_name("type"),
            node.child_by_field_name("arguments"),
        ) else {
            return;
        };
        if ctx.text(ty) != "String" {
            return;
        }
        let mut cursor = node.walk();
        if node.children(&mut cursor).any(|c| c.kind() == "class_body") {
            return;
        }
        match significant_children(args).as_slice() {
            [] => ctx.replace(node, "\"\""),
            [arg] if arg.kind() == "string_literal" => {
                let text = ctx.text(*arg).to_string();
                ctx.replace(node, text);
            }
            _ => {}
        }
    }
}
