//! Fixed-point recipe execution.
//!
//! The driver loop lives here, outside the recipes themselves: parse, let
//! every active recipe visit every node, splice the accepted edits, re-parse,
//! and repeat until a pass applies nothing. Recipes are required to be
//! idempotent, so the loop converges; `MAX_PASSES` bounds it regardless.

use crate::{Recipe, RewriteContext};
use rayon::prelude::*;
use rejig_core::{EditSet, Imports, TypeScope, preorder, tree};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Iteration cap for the per-file fixed point.
pub const MAX_PASSES: usize = 10;

/// Debug output categories.
#[derive(Debug, Default)]
pub struct DebugFlags {
    pub timing: bool,
}

impl DebugFlags {
    pub fn from_args(args: &[String]) -> Self {
        let all = args.iter().any(|s| s == "all");
        Self {
            timing: all || args.iter().any(|s| s == "timing"),
        }
    }
}

/// Result of rewriting one source string to a fixed point.
#[derive(Debug)]
pub struct RewriteOutcome {
    pub text: String,
    /// Passes that applied at least one edit.
    pub passes: usize,
    /// Applied edit counts per recipe id.
    pub applied: BTreeMap<&'static str, usize>,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.passes > 0
    }
}

/// Rewrite one source string with the given recipes until no recipe
/// produces an edit, bounded by `MAX_PASSES`.
///
/// A file that does not parse cleanly is never rewritten.
pub fn rewrite_source(
    recipes: &[Box<dyn Recipe>],
    source: &str,
) -> Result<RewriteOutcome, String> {
    let mut parser = tree::parser();
    let mut text = source.to_string();
    let mut applied: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut passes = 0;

    for _ in 0..MAX_PASSES {
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| "tree-sitter returned no tree".to_string())?;
        if tree.root_node().has_error() {
            return Err("syntax errors; leaving file unchanged".to_string());
        }

        let types = TypeScope::build(&tree, &text);
        let imports = Imports::scan(&tree, &text);
        let mut ctx = RewriteContext::new(&text, &types, &imports);

        for node in preorder(&tree) {
            for recipe in recipes {
                ctx.set_current(recipe.id());
                recipe.visit(node, &mut ctx);
            }
        }

        let (mut edits, adds, removes) = ctx.finish();
        materialize_imports(&mut edits, &imports, &text, adds, removes);

        if edits.is_empty() {
            break;
        }
        let (new_text, accepted) = edits.apply(&text);
        if accepted.is_empty() {
            break;
        }
        for edit in &accepted {
            *applied.entry(edit.recipe_id).or_insert(0) += 1;
        }
        text = new_text;
        passes += 1;
    }

    Ok(RewriteOutcome {
        text,
        passes,
        applied,
    })
}

/// Turn import requests into edits, once per path per pass.
fn materialize_imports(
    edits: &mut EditSet,
    imports: &Imports,
    source: &str,
    adds: Vec<(&'static str, String)>,
    removes: Vec<(&'static str, String)>,
) {
    let mut seen: HashSet<String> = HashSet::new();
    for (recipe_id, path) in adds {
        if !seen.insert(path.clone()) {
            continue;
        }
        if let Some(edit) = imports.add(&path, recipe_id) {
            edits.push(edit);
        }
    }
    seen.clear();
    for (recipe_id, path) in removes {
        if !seen.insert(path.clone()) {
            continue;
        }
        if let Some(edit) = imports.remove(&path, source, recipe_id) {
            edits.push(edit);
        }
    }
}

/// Outcome for one file on disk.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub applied: BTreeMap<&'static str, usize>,
    pub original: String,
    pub rewritten: String,
}

/// Options for a directory run.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Report changes without writing files.
    pub dry_run: bool,
    pub debug: DebugFlags,
}

/// Run recipes over every `.java` file under `root` (gitignore-aware),
/// writing changed files unless `dry_run` is set.
pub fn run_recipes(
    recipes: &[Box<dyn Recipe>],
    root: &Path,
    options: &RunOptions,
) -> Vec<FileOutcome> {
    let start = std::time::Instant::now();
    let files = collect_java_files(root);
    if options.debug.timing {
        eprintln!(
            "[timing] file collection: {:?} ({} files)",
            start.elapsed(),
            files.len()
        );
    }

    let process_start = std::time::Instant::now();
    let mut outcomes: Vec<FileOutcome> = files
        .par_iter()
        .filter_map(|file| {
            let original = match std::fs::read_to_string(file) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("warning: skipping {}: {}", file.display(), e);
                    return None;
                }
            };
            let outcome = match rewrite_source(recipes, &original) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("warning: skipping {}: {}", file.display(), e);
                    return None;
                }
            };
            let changed = outcome.text != original;
            if changed && !options.dry_run {
                if let Err(e) = std::fs::write(file, &outcome.text) {
                    eprintln!("warning: failed to write {}: {}", file.display(), e);
                    return None;
                }
            }
            Some(FileOutcome {
                path: file.clone(),
                changed,
                applied: outcome.applied,
                original,
                rewritten: outcome.text,
            })
        })
        .collect();
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    if options.debug.timing {
        eprintln!("[timing] rewriting: {:?}", process_start.elapsed());
    }
    outcomes
}

fn collect_java_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = ignore::WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();
    for entry in walker.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "java") {
            files.push(path.to_path_buf());
        }
    }
    files
}
