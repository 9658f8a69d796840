//! Statement-level control flow cleanups.

use crate::{Recipe, RewriteContext};
use rejig_core::{line_start, node_text, significant_children, unwrap_parens};
use tree_sitter::Node;

/// Does lifting this expression into an `&&` chain require parentheses?
fn needs_parens(node: Node<'_>, ctx: &RewriteContext<'_>) -> bool {
    match node.kind() {
        "binary_expression" => node
            .child_by_field_name("operator")
            .is_some_and(|op| ctx.text(op) == "||"),
        "assignment_expression" | "ternary_expression" | "lambda_expression" => true,
        _ => false,
    }
}

fn and_operand(condition: Node<'_>, ctx: &RewriteContext<'_>) -> String {
    let inner = unwrap_parens(condition);
    let text = ctx.text(inner);
    if needs_parens(inner, ctx) {
        format!("({text})")
    } else {
        text.to_string()
    }
}

/// `if (a) { if (b) { .. } }` -> `if (a && b) { .. }` when neither `if` has
/// an `else` and nothing else (comments included) sits between them.
pub struct CollapseNestedIf;

impl Recipe for CollapseNestedIf {
    fn id(&self) -> &'static str {
        "cleanup/collapse-nested-if"
    }

    fn description(&self) -> &'static str {
        "Merge an if whose body is only another if"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "if_statement" || node.child_by_field_name("alternative").is_some() {
            return;
        }
        let (Some(outer_condition), Some(consequence)) = (
            node.child_by_field_name("condition"),
            node.child_by_field_name("consequence"),
        ) else {
            return;
        };
        if consequence.kind() != "block" || consequence.named_child_count() != 1 {
            return;
        }
        let Some(inner) = consequence.named_child(0) else {
            return;
        };
        if inner.kind() != "if_statement" || inner.child_by_field_name("alternative").is_some() {
            return;
        }
        let (Some(inner_condition), Some(inner_consequence)) = (
            inner.child_by_field_name("condition"),
            inner.child_by_field_name("consequence"),
        ) else {
            return;
        };
        let merged = format!(
            "if ({} && {}) {}",
            and_operand(outer_condition, ctx),
            and_operand(inner_condition, ctx),
            ctx.text(inner_consequence)
        );
        ctx.replace(node, merged);
    }
}

const EXIT_STATEMENTS: &[&str] = &[
    "break_statement",
    "continue_statement",
    "return_statement",
    "throw_statement",
    "yield_statement",
];

fn group_has_default(group: Node<'_>, source: &str) -> bool {
    significant_children(group)
        .iter()
        .any(|c| c.kind() == "switch_label" && node_text(*c, source) == "default")
}

fn group_exits(group: Node<'_>) -> bool {
    significant_children(group)
        .iter()
        .rev()
        .find(|c| c.kind() != "switch_label")
        .is_some_and(|last| EXIT_STATEMENTS.contains(&last.kind()))
}

/// Move a colon-style `default:` group to the end of its switch when every
/// group ends in an unconditional exit, so no fall-through path changes.
pub struct DefaultCaseLast;

impl Recipe for DefaultCaseLast {
    fn id(&self) -> &'static str {
        "cleanup/default-case-last"
    }

    fn description(&self) -> &'static str {
        "Put the default switch case last"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "switch_expression" {
            return;
        }
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let groups = significant_children(body);
        // Arrow rules cannot fall through but reordering them buys nothing.
        if groups.iter().any(|g| g.kind() != "switch_block_statement_group") {
            return;
        }
        let Some(default_index) = groups
            .iter()
            .position(|g| group_has_default(*g, ctx.source()))
        else {
            return;
        };
        if default_index + 1 == groups.len() {
            return;
        }
        if !groups.iter().all(|g| group_exits(*g)) {
            return;
        }

        let source = ctx.source();
        let default_group = groups[default_index];
        let start = line_start(source, default_group.start_byte());
        let mut end = default_group.end_byte();
        if source[end..].starts_with('\n') {
            end += 1;
        }
        let moved = source[start..default_group.end_byte()].to_string();
        let last_end = groups[groups.len() - 1].end_byte();
        ctx.delete_range(start, end);
        ctx.replace_range(last_end, last_end, format!("\n{moved}"));
    }
}

/// `if (c) { .. } else {}` -> `if (c) { .. }`.
pub struct RemoveEmptyElse;

impl Recipe for RemoveEmptyElse {
    fn id(&self) -> &'static str {
        "cleanup/remove-empty-else"
    }

    fn description(&self) -> &'static str {
        "Drop else branches with empty bodies"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "if_statement" {
            return;
        }
        let (Some(consequence), Some(alternative)) = (
            node.child_by_field_name("consequence"),
            node.child_by_field_name("alternative"),
        ) else {
            return;
        };
        // A comment inside the braces counts as content.
        if alternative.kind() != "block" || alternative.named_child_count() != 0 {
            return;
        }
        ctx.delete_range(consequence.end_byte(), alternative.end_byte());
    }
}

/// `return (x);` -> `return x;`.
pub struct UnnecessaryReturnParentheses;

impl Recipe for UnnecessaryReturnParentheses {
    fn id(&self) -> &'static str {
        "cleanup/unnecessary-return-parentheses"
    }

    fn description(&self) -> &'static str {
        "Drop parentheses around a whole return value"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "return_statement" {
            return;
        }
        let Some(value) = node.named_child(0) else {
            return;
        };
        if value.kind() != "parenthesized_expression" {
            return;
        }
        // Unwrap every layer ourselves so a comment at any level aborts.
        let mut inner = value;
        while inner.kind() == "parenthesized_expression" {
            if inner.named_child_count() != 1 {
                return;
            }
            let Some(child) = inner.named_child(0) else {
                return;
            };
            inner = child;
        }
        ctx.replace(value, ctx.text(inner).to_string());
    }
}

/// Removes `;` tokens that are whole (empty) statements or stray class-body
/// members, along with any spaces before them on the same line.
pub struct RemoveExtraSemicolons;

impl Recipe for RemoveExtraSemicolons {
    fn id(&self) -> &'static str {
        "cleanup/remove-extra-semicolons"
    }

    fn description(&self) -> &'static str {
        "Remove stray semicolons"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.is_named() || node.kind() != ";" {
            return;
        }
        let Some(parent) = node.parent() else {
            return;
        };
        if !matches!(parent.kind(), "block" | "class_body" | "program") {
            return;
        }
        let source = ctx.source();
        let mut start = node.start_byte();
        while start > 0 && matches!(source.as_bytes()[start - 1], b' ' | b'\t') {
            start -= 1;
        }
        ctx.delete_range(start, node.end_byte());
    }
}
