//! Shared building blocks for rejig recipes: Java parsing helpers, the
//! byte-splice edit model, import management, and local type attribution.

pub mod edit;
pub mod imports;
pub mod tree;
pub mod types;

pub use edit::{Edit, EditSet};
pub use imports::{ImportDecl, Imports};
pub use tree::{
    is_comment, line_start, node_text, parse, parser, preorder, significant_children,
    unwrap_parens,
};
pub use types::TypeScope;

// Re-export tree-sitter so recipe crates use one consistent version.
pub use tree_sitter;
