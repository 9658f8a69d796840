//! `rejig list`: enumerate the recipe catalog.

use crate::output::OutputFormat;
use clap::Args;
use rejig_recipes::builtin;

#[derive(Args)]
pub struct ListArgs {
    /// Only list recipes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}

pub fn cmd_list(args: &ListArgs, json: bool) -> i32 {
    let recipes: Vec<_> = builtin::all()
        .into_iter()
        .filter(|r| args.tag.as_deref().is_none_or(|t| r.tags().contains(&t)))
        .collect();

    match OutputFormat::from_flag(json) {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = recipes
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id(),
                        "description": r.description(),
                        "tags": r.tags(),
                        "options": r.option_keys(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            let width = recipes.iter().map(|r| r.id().len()).max().unwrap_or(0);
            for recipe in &recipes {
                println!(
                    "{:width$}  {}  [{}]",
                    recipe.id(),
                    recipe.description(),
                    recipe.tags().join(", ")
                );
            }
            println!("{} recipe(s)", recipes.len());
        }
    }
    0
}
