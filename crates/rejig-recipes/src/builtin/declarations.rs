//! Declaration, modifier, and import cleanups.

use crate::{Recipe, RewriteContext};
use rejig_core::{is_comment, significant_children, unwrap_parens};
use tree_sitter::Node;

fn is_simple_reference(node: Node<'_>) -> bool {
    matches!(node.kind(), "identifier" | "field_access")
}

/// Match `x == null` / `x != null` with a simple reference on the other side.
fn null_comparison<'t>(
    node: Node<'t>,
    ctx: &RewriteContext<'_>,
) -> Option<(Node<'t>, bool)> {
    let node = unwrap_parens(node);
    if node.kind() != "binary_expression" {
        return None;
    }
    let (left, op, right) = (
        node.child_by_field_name("left")?,
        node.child_by_field_name("operator")?,
        node.child_by_field_name("right")?,
    );
    let equals = match ctx.text(op) {
        "==" => true,
        "!=" => false,
        _ => return None,
    };
    let operand = if left.kind() == "null_literal" {
        right
    } else if right.kind() == "null_literal" {
        left
    } else {
        return None;
    };
    if !is_simple_reference(operand) {
        return None;
    }
    Some((operand, equals))
}

/// Match `recv.equals(arg)` with simple references on both sides.
fn simple_equals_call<'t>(
    node: Node<'t>,
    ctx: &RewriteContext<'_>,
) -> Option<(Node<'t>, Node<'t>)> {
    let node = unwrap_parens(node);
    if node.kind() != "method_invocation" {
        return None;
    }
    let receiver = node.child_by_field_name("object")?;
    let name = node.child_by_field_name("name")?;
    let args = node.child_by_field_name("arguments")?;
    if ctx.text(name) != "equals" {
        return None;
    }
    let args = significant_children(args);
    let [arg] = args.as_slice() else {
        return None;
    };
    if !is_simple_reference(receiver) || !is_simple_reference(*arg) {
        return None;
    }
    Some((receiver, *arg))
}

/// Hand-rolled null-safe equals ternaries become `Objects.equals(a, b)`:
///
/// - `a == null ? b == null : a.equals(b)`
/// - `a != null ? a.equals(b) : b == null`
pub struct ObjectsEquals;

impl Recipe for ObjectsEquals {
    fn id(&self) -> &'static str {
        "cleanup/objects-equals"
    }

    fn description(&self) -> &'static str {
        "Use Objects.equals for null-safe equality ternaries"
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

        let matched = if let (Some((a, true)), Some((b, true)), Some((recv, arg))) = (
            null_comparison(condition, ctx),
            null_comparison(consequence, ctx),
            simple_equals_call(alternative, ctx),
        ) {
            // a == null ? b == null : a.equals(b)
            (ctx.text(a) == ctx.text(recv) && ctx.text(b) == ctx.text(arg))
                .then(|| (ctx.text(a), ctx.text(b)))
        } else if let (Some((a, false)), Some((recv, arg)), Some((b, true))) = (
            null_comparison(condition, ctx),
            simple_equals_call(consequence, ctx),
            null_comparison(alternative, ctx),
        ) {
            // a != null ? a.equals(b) : b == null
            (ctx.text(a) == ctx.text(recv) && ctx.text(b) == ctx.text(arg))
                .then(|| (ctx.text(a), ctx.text(b)))
        } else {
            None
        };

        if let Some((a, b)) = matched {
            let replacement = format!("Objects.equals({a}, {b})");
            ctx.replace(node, replacement);
            ctx.add_import("java.util.Objects");
        }
    }
}

/// Initializer texts that restate the JVM default for a primitive type.
fn is_default_value(ty: &str, value: &str) -> bool {
    match ty {
        "byte" | "short" | "int" => value == "0",
        "long" => matches!(value, "0" | "0L" | "0l"),
        "float" => matches!(value, "0" | "0f" | "0F" | "0.0f" | "0.0F"),
        "double" => matches!(value, "0" | "0.0" | "0d" | "0D" | "0.0d" | "0.0D"),
        "boolean" => value == "false",
        "char" => matches!(value, r"'\0'" | r"'\u0000'"),
        // Every non-primitive type defaults to null.
        _ => value == "null",
    }
}

/// Drop field initializers that restate the JVM default, e.g.
/// `private int count = 0;` -> `private int count;`.
pub struct ExplicitInitialization;

impl Recipe for ExplicitInitialization {
    fn id(&self) -> &'static str {
        "cleanup/explicit-initialization"
    }

    fn description(&self) -> &'static str {
        "Remove field initializers that restate the default value"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "field_declaration" {
            return;
        }
        let mut cursor = node.walk();
        if let Some(modifiers) = node.children(&mut cursor).find(|c| c.kind() == "modifiers") {
            let mut mod_cursor = modifiers.walk();
            for child in modifiers.children(&mut mod_cursor) {
                // final fields need their initializer; static initialization
                // order can be observable; annotations may carry meaning.
                if matches!(child.kind(), "final" | "static") || child.is_named() {
                    return;
                }
            }
        }
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        let ty_text = ctx.text(ty).to_string();
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for decl in declarators {
            let (Some(name), Some(value)) = (
                decl.child_by_field_name("name"),
                decl.child_by_field_name("value"),
            ) else {
                continue;
            };
            // C-style `int x[]` puts the array dimensions on the declarator;
            // they are part of the type and must survive the deletion.
            let dimensions = decl.child_by_field_name("dimensions");
            let effective_ty = if dimensions.is_some() || ty.kind() == "array_type" {
                "[]"
            } else {
                ty_text.as_str()
            };
            if is_default_value(effective_ty, ctx.text(value)) {
                let keep_until = dimensions.map_or(name.end_byte(), |d| d.end_byte());
                ctx.delete_range(keep_until, decl.end_byte());
            }
        }
    }
}

/// JLS canonical modifier order.
fn modifier_rank(keyword: &str) -> Option<usize> {
    const ORDER: &[&str] = &[
        "public",
        "protected",
        "private",
        "abstract",
        "default",
        "static",
        "final",
        "transient",
        "volatile",
        "synchronized",
        "native",
        "strictfp",
        "sealed",
        "non-sealed",
    ];
    ORDER.iter().position(|k| *k == keyword).map(|i| match i {
        // The three access modifiers share a rank.
        0..=2 => 0,
        other => other - 2,
    })
}

/// `final static public int X` -> `public static final int X`.
pub struct ModifierOrder;

impl Recipe for ModifierOrder {
    fn id(&self) -> &'static str {
        "cleanup/modifier-order"
    }

    fn description(&self) -> &'static str {
        "Sort declaration modifiers into canonical order"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "modifiers" {
            return;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        if children.iter().any(|c| is_comment(*c)) {
            return;
        }
        let keywords: Vec<Node> = children.iter().copied().filter(|c| !c.is_named()).collect();
        if keywords.len() < 2 {
            return;
        }
        let mut ranked = Vec::with_capacity(keywords.len());
        for kw in &keywords {
            let Some(rank) = modifier_rank(ctx.text(*kw)) else {
                return;
            };
            ranked.push((rank, ctx.text(*kw)));
        }
        if ranked.is_sorted_by_key(|(rank, _)| *rank) {
            return;
        }
        let start = keywords[0].start_byte();
        let end = keywords[keywords.len() - 1].end_byte();
        // An annotation between keywords would be dragged to one side.
        if children
            .iter()
            .any(|c| c.is_named() && c.start_byte() > start && c.end_byte() < end)
        {
            return;
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        let sorted = ranked
            .iter()
            .map(|(_, text)| *text)
            .collect::<Vec<_>>()
            .join(" ");
        ctx.replace_range(start, end, sorted);
    }
}

/// `List<String> l = new ArrayList<String>()` -> `new ArrayList<>()`.
pub struct UseDiamondOperator;

impl Recipe for UseDiamondOperator {
    fn id(&self) -> &'static str {
        "migrate/use-diamond-operator"
    }

    fn description(&self) -> &'static str {
        "Use the diamond operator when the initializer repeats the type arguments"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["migrate", "java7"]
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if !matches!(
            node.kind(),
            "local_variable_declaration" | "field_declaration"
        ) {
            return;
        }
        let Some(declared) = node.child_by_field_name("type") else {
            return;
        };
        if declared.kind() != "generic_type" {
            return;
        }
        let Some(declared_args) = named_child_of_kind(declared, "type_arguments") else {
            return;
        };
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for decl in declarators {
            let Some(value) = decl.child_by_field_name("value") else {
                continue;
            };
            if value.kind() != "object_creation_expression" {
                continue;
            }
            let mut value_cursor = value.walk();
            if value
                .children(&mut value_cursor)
                .any(|c| c.kind() == "class_body")
            {
                continue;
            }
            let Some(new_ty) = value.child_by_field_name("type") else {
                continue;
            };
            if new_ty.kind() != "generic_type" {
                continue;
            }
            let Some(new_args) = named_child_of_kind(new_ty, "type_arguments") else {
                continue;
            };
            if new_args.named_child_count() == 0 {
                continue;
            }
            if ctx.text(new_args) != ctx.text(declared_args) {
                continue;
            }
            ctx.replace(new_args, "<>");
        }
    }
}

fn named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

/// Remove single-type imports whose simple name never appears in the rest of
/// the file. Wildcard and static imports are kept; so is anything matching a
/// configured `keep` glob.
#[derive(Default)]
pub struct RemoveUnusedImports {
    keep: Vec<glob::Pattern>,
}

impl Recipe for RemoveUnusedImports {
    fn id(&self) -> &'static str {
        "cleanup/remove-unused-imports"
    }

    fn description(&self) -> &'static str {
        "Remove imports whose simple name is never used"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["cleanup"]
    }

    fn option_keys(&self) -> &'static [&'static str] {
        &["keep"]
    }

    fn configure(&mut self, options: &toml::Table) {
        let Some(toml::Value::Array(patterns)) = options.get("keep") else {
            return;
        };
        for pattern in patterns.iter().filter_map(|v| v.as_str()) {
            match glob::Pattern::new(pattern) {
                Ok(p) => self.keep.push(p),
                Err(e) => eprintln!("warning: ignoring keep pattern {pattern:?}: {e}"),
            }
        }
    }

    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>) {
        if node.kind() != "import_declaration" {
            return;
        }
        let imports = ctx.imports();
        let Some(decl) = imports.iter().find(|d| d.start_byte == node.start_byte()) else {
            return;
        };
        // Wildcards hide what they supply; static imports bring in members
        // whose names look like ordinary calls. Both stay.
        if decl.is_wildcard || decl.is_static {
            return;
        }
        let path = decl.path.clone();
        if self.keep.iter().any(|p| p.matches(&path)) {
            return;
        }
        let Some(simple) = path.rsplit('.').next() else {
            return;
        };
        let pattern = match regex::Regex::new(&format!(r"\b{}\b", regex::escape(simple))) {
            Ok(p) => p,
            Err(_) => return,
        };
        let import_ranges: Vec<(usize, usize)> =
            imports.iter().map(|d| (d.start_byte, d.end_byte)).collect();
        let used = pattern.find_iter(ctx.source()).any(|m| {
            !import_ranges
                .iter()
                .any(|(start, end)| m.start() >= *start && m.start() < *end)
        });
        if !used {
            ctx.remove_import(&path);
        }
    }
}
