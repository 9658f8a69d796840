//! `rejig run`: rewrite Java sources under a path.

use crate::config::Config;
use crate::diff;
use crate::output::{OutputFormat, use_colors};
use clap::Args;
use rejig_recipes::{DebugFlags, RunOptions, filter_recipes, load_recipes, run_recipes};
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Directory or file to rewrite
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only run the recipe with this id
    #[arg(long)]
    pub recipe: Option<String>,

    /// Only run recipes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print a diff for each changed file
    #[arg(long)]
    pub diff: bool,

    /// Debug output categories (timing, all)
    #[arg(long, value_name = "CATEGORY")]
    pub debug: Vec<String>,
}

pub fn cmd_run(args: &RunArgs, json: bool) -> i32 {
    let format = OutputFormat::from_flag(json);
    let project_root = if args.path.is_file() {
        args.path.parent().unwrap_or(&args.path).to_path_buf()
    } else {
        args.path.clone()
    };
    let config = match Config::load(&project_root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let recipes = filter_recipes(
        load_recipes(&config.recipes),
        args.recipe.as_deref(),
        args.tag.as_deref(),
    );
    if recipes.is_empty() {
        eprintln!("error: no recipes match the given filters");
        return 2;
    }

    let options = RunOptions {
        dry_run: args.dry_run,
        debug: DebugFlags::from_args(&args.debug),
    };
    let outcomes = run_recipes(&recipes, &args.path, &options);
    let changed: Vec<_> = outcomes.iter().filter(|o| o.changed).collect();

    match format {
        OutputFormat::Json => {
            let files: Vec<serde_json::Value> = outcomes
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "path": o.path,
                        "changed": o.changed,
                        "applied": o.applied,
                    })
                })
                .collect();
            let report = serde_json::json!({
                "dry_run": args.dry_run,
                "files_seen": outcomes.len(),
                "files_changed": changed.len(),
                "files": files,
            });
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        }
        OutputFormat::Text => {
            let colors = use_colors();
            for outcome in &changed {
                let total: usize = outcome.applied.values().sum();
                println!("{}: {} change(s)", outcome.path.display(), total);
                for (recipe, count) in &outcome.applied {
                    println!("  {recipe} x{count}");
                }
                if args.diff {
                    if let Some(rendered) =
                        diff::render(&outcome.path, &outcome.original, &outcome.rewritten, colors)
                    {
                        print!("{rendered}");
                    }
                }
            }
            let suffix = if args.dry_run { " (dry run)" } else { "" };
            println!(
                "{} of {} file(s) changed{suffix}",
                changed.len(),
                outcomes.len()
            );
        }
    }

    if args.dry_run && !changed.is_empty() {
        return 1;
    }
    0
}
