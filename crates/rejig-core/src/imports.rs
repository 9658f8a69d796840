//! Import management for rewritten files.
//!
//! Recipes do not edit the import section themselves; they request additions
//! and removals through the rewrite context, and the runner materializes the
//! requests here once per pass.

use crate::edit::Edit;
use crate::tree::{line_start, node_text};
use tree_sitter::Tree;

/// One `import` declaration in the file header.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    /// Imported path, e.g. `java.util.List` or `java.util.*`.
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    /// Byte range of the declaration, through the `;`.
    pub start_byte: usize,
    pub end_byte: usize,
    /// Start of the line the declaration sits on.
    pub line_start: usize,
}

/// The import section of a single file.
#[derive(Debug, Default)]
pub struct Imports {
    decls: Vec<ImportDecl>,
    /// End byte of the `package` declaration, if any.
    package_end: Option<usize>,
}

impl Imports {
    /// Scan the top-level declarations of a parsed file.
    pub fn scan(tree: &Tree, source: &str) -> Self {
        let root = tree.root_node();
        let mut decls = Vec::new();
        let mut package_end = None;

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => package_end = Some(child.end_byte()),
                "import_declaration" => {
                    let mut is_static = false;
                    let mut is_wildcard = false;
                    let mut base = None;
                    let mut inner = child.walk();
                    for part in child.children(&mut inner) {
                        match part.kind() {
                            "static" => is_static = true,
                            "asterisk" => is_wildcard = true,
                            "scoped_identifier" | "identifier" => {
                                base = Some(node_text(part, source).to_string());
                            }
                            _ => {}
                        }
                    }
                    let Some(base) = base else { continue };
                    let path = if is_wildcard {
                        format!("{base}.*")
                    } else {
                        base
                    };
                    decls.push(ImportDecl {
                        path,
                        is_static,
                        is_wildcard,
                        start_byte: child.start_byte(),
                        end_byte: child.end_byte(),
                        line_start: line_start(source, child.start_byte()),
                    });
                }
                _ => {}
            }
        }

        Self { decls, package_end }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportDecl> {
        self.decls.iter()
    }

    /// Is `path` already importable, either exactly or via a wildcard?
    pub fn has(&self, path: &str) -> bool {
        let wildcard = path
            .rsplit_once('.')
            .map(|(pkg, _)| format!("{pkg}.*"));
        self.decls.iter().any(|d| {
            if d.is_static {
                return false;
            }
            d.path == path || wildcard.as_deref() == Some(d.path.as_str())
        })
    }

    /// Edit inserting `import path;` at its sorted position among the
    /// existing non-static imports. None if already covered.
    pub fn add(&self, path: &str, recipe_id: &'static str) -> Option<Edit> {
        if self.has(path) {
            return None;
        }

        // Insert before the first import that sorts after the new path.
        if let Some(next) = self
            .decls
            .iter()
            .find(|d| !d.is_static && d.path.as_str() > path)
        {
            return Some(Edit {
                start_byte: next.line_start,
                end_byte: next.line_start,
                replacement: format!("import {path};\n"),
                recipe_id,
            });
        }

        if let Some(last) = self.decls.last() {
            return Some(Edit {
                start_byte: last.end_byte,
                end_byte: last.end_byte,
                replacement: format!("\nimport {path};"),
                recipe_id,
            });
        }

        if let Some(package_end) = self.package_end {
            return Some(Edit {
                start_byte: package_end,
                end_byte: package_end,
                replacement: format!("\n\nimport {path};"),
                recipe_id,
            });
        }

        Some(Edit {
            start_byte: 0,
            end_byte: 0,
            replacement: format!("import {path};\n\n"),
            recipe_id,
        })
    }

    /// Edit deleting the exact (non-wildcard, non-static) import of `path`,
    /// line included. None if no such import exists.
    pub fn remove(&self, path: &str, source: &str, recipe_id: &'static str) -> Option<Edit> {
        let decl = self
            .decls
            .iter()
            .find(|d| !d.is_static && !d.is_wildcard && d.path == path)?;
        let mut end = decl.end_byte;
        if source.as_bytes().get(end) == Some(&b'\n') {
            end += 1;
        }
        Some(Edit {
            start_byte: decl.line_start,
            end_byte: end,
            replacement: String::new(),
            recipe_id,
        })
    }
}
