//! `rejig describe`: show one recipe in detail.

use crate::output::OutputFormat;
use clap::Args;
use rejig_recipes::builtin;

#[derive(Args)]
pub struct DescribeArgs {
    /// Recipe id, e.g. cleanup/use-is-empty
    pub id: String,
}

pub fn cmd_describe(args: &DescribeArgs, json: bool) -> i32 {
    let Some(recipe) = builtin::all().into_iter().find(|r| r.id() == args.id) else {
        eprintln!("error: no recipe with id {:?}", args.id);
        return 2;
    };

    match OutputFormat::from_flag(json) {
        OutputFormat::Json => {
            let entry = serde_json::json!({
                "id": recipe.id(),
                "description": recipe.description(),
                "tags": recipe.tags(),
                "options": recipe.option_keys(),
            });
            println!("{}", serde_json::to_string_pretty(&entry).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("{}", recipe.id());
            println!("  {}", recipe.description());
            println!("  tags: {}", recipe.tags().join(", "));
            if !recipe.option_keys().is_empty() {
                println!("  options: {}", recipe.option_keys().join(", "));
            }
        }
    }
    0
}
