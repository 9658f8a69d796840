//! Pattern-match-and-rewrite recipes for Java sources.
//!
//! Each recipe is an independent visitor over the tree-sitter CST: it
//! recognizes one narrow syntactic/semantic shape and emits localized
//! byte-splice edits, or does nothing at all. A recipe that cannot prove its
//! precondition leaves the tree unchanged; ambiguity always means no-op.
//!
//! Recipes never compose with each other directly; the runner re-runs the
//! active set to a fixed point, so a rewrite enabled by another recipe's
//! output is picked up on a later pass.

pub mod builtin;
pub mod registry;
pub mod runner;

pub use registry::{RecipeOverride, RecipesConfig, filter_recipes, load_recipes};
pub use runner::{
    DebugFlags, FileOutcome, MAX_PASSES, RewriteOutcome, RunOptions, rewrite_source, run_recipes,
};

use rejig_core::{Edit, EditSet, Imports, TypeScope, node_text};
use tree_sitter::Node;

/// A named, independent source-to-source transformation.
pub trait Recipe: Send + Sync {
    /// Stable identifier, e.g. `cleanup/indexof-to-contains`.
    fn id(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &'static str;

    /// Classification tags used for activation, e.g. `cleanup`, `java9`.
    fn tags(&self) -> &'static [&'static str];

    /// Option keys this recipe accepts in configuration.
    fn option_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Apply narrow per-recipe options from configuration.
    fn configure(&mut self, _options: &toml::Table) {}

    /// Inspect one node, pushing edits into the context when the recipe's
    /// precondition provably holds.
    fn visit(&self, node: Node<'_>, ctx: &mut RewriteContext<'_>);
}

/// Per-pass state handed to recipes: the source being matched, the declared
/// type scope, the import section, and the collected edits.
pub struct RewriteContext<'a> {
    source: &'a str,
    types: &'a TypeScope,
    imports: &'a Imports,
    edits: EditSet,
    import_adds: Vec<(&'static str, String)>,
    import_removes: Vec<(&'static str, String)>,
    current_recipe: &'static str,
}

impl<'a> RewriteContext<'a> {
    pub fn new(source: &'a str, types: &'a TypeScope, imports: &'a Imports) -> Self {
        Self {
            source,
            types,
            imports,
            edits: EditSet::new(),
            import_adds: Vec::new(),
            import_removes: Vec::new(),
            current_recipe: "",
        }
    }

    pub(crate) fn set_current(&mut self, id: &'static str) {
        self.current_recipe = id;
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Text of a node in the source being matched.
    pub fn text(&self, node: Node<'_>) -> &'a str {
        node_text(node, self.source)
    }

    pub fn types(&self) -> &TypeScope {
        self.types
    }

    pub fn imports(&self) -> &Imports {
        self.imports
    }

    /// Declared base type of an expression (`List`, `String`, ...), if
    /// provable from this file alone.
    pub fn base_type(&self, node: Node<'_>) -> Option<String> {
        self.types.base_type_of(node, self.source)
    }

    /// Replace a whole node.
    pub fn replace(&mut self, node: Node<'_>, replacement: impl Into<String>) {
        let range = node.byte_range();
        self.replace_range(range.start, range.end, replacement);
    }

    /// Replace an arbitrary byte range (insertion when start == end).
    pub fn replace_range(
        &mut self,
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
    ) {
        self.edits.push(Edit {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            recipe_id: self.current_recipe,
        });
    }

    pub fn delete_range(&mut self, start_byte: usize, end_byte: usize) {
        self.replace_range(start_byte, end_byte, "");
    }

    /// Request `import path;` be present after this pass.
    pub fn add_import(&mut self, path: &str) {
        self.import_adds.push((self.current_recipe, path.to_string()));
    }

    /// Request the exact import of `path` be dropped after this pass.
    pub fn remove_import(&mut self, path: &str) {
        self.import_removes
            .push((self.current_recipe, path.to_string()));
    }

    #[allow(clippy::type_complexity)]
    pub(crate) fn finish(
        self,
    ) -> (
        EditSet,
        Vec<(&'static str, String)>,
        Vec<(&'static str, String)>,
    ) {
        (self.edits, self.import_adds, self.import_removes)
    }
}
