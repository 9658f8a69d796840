//! Recipe registry and per-recipe configuration.
//!
//! Builtins are constructed in code and keyed by stable id. Configuration
//! can disable a recipe or pass narrow options:
//!
//! ```toml
//! ["cleanup/collapse-nested-if"]
//! enabled = false
//!
//! ["cleanup/remove-unused-imports"]
//! keep = ["javax.annotation.*"]
//! ```

use crate::{Recipe, builtin};
use serde::Deserialize;
use std::collections::HashMap;

/// Per-recipe configuration, keyed by recipe id.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct RecipesConfig(pub HashMap<String, RecipeOverride>);

/// Per-recipe configuration override.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RecipeOverride {
    /// Enable or disable the recipe.
    pub enabled: Option<bool>,
    /// Recipe-specific options, passed to `Recipe::configure`.
    #[serde(flatten)]
    pub options: toml::Table,
}

impl RecipesConfig {
    /// Later config overrides earlier by id (global then project order).
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

/// Construct all enabled builtin recipes with config overrides applied.
pub fn load_recipes(config: &RecipesConfig) -> Vec<Box<dyn Recipe>> {
    let mut recipes = Vec::new();
    for mut recipe in builtin::all() {
        if let Some(override_cfg) = config.0.get(recipe.id()) {
            if override_cfg.enabled == Some(false) {
                continue;
            }
            if !override_cfg.options.is_empty() {
                recipe.configure(&override_cfg.options);
            }
        }
        recipes.push(recipe);
    }
    recipes
}

/// Narrow the active set by id or tag.
pub fn filter_recipes(
    recipes: Vec<Box<dyn Recipe>>,
    id: Option<&str>,
    tag: Option<&str>,
) -> Vec<Box<dyn Recipe>> {
    recipes
        .into_iter()
        .filter(|r| id.is_none_or(|f| r.id() == f))
        .filter(|r| tag.is_none_or(|t| r.tags().contains(&t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_are_unique() {
        let mut seen = HashSet::new();
        for recipe in builtin::all() {
            assert!(seen.insert(recipe.id()), "duplicate id: {}", recipe.id());
        }
    }

    #[test]
    fn config_disables_recipes() {
        let config: RecipesConfig =
            toml::from_str("[\"cleanup/double-negation\"]\nenabled = false\n").unwrap();
        let recipes = load_recipes(&config);
        assert!(recipes.iter().all(|r| r.id() != "cleanup/double-negation"));
        assert_eq!(recipes.len(), builtin::all().len() - 1);
    }

    #[test]
    fn filter_by_tag() {
        let recipes = filter_recipes(load_recipes(&RecipesConfig::default()), None, Some("java9"));
        assert!(!recipes.is_empty());
        assert!(recipes.iter().all(|r| r.tags().contains(&"java9")));
    }

    #[test]
    fn filter_by_id() {
        let recipes = filter_recipes(
            load_recipes(&RecipesConfig::default()),
            Some("cleanup/use-is-empty"),
            None,
        );
        assert_eq!(recipes.len(), 1);
    }

    #[test]
    fn project_config_overrides_global() {
        let global: RecipesConfig =
            toml::from_str("[\"cleanup/double-negation\"]\nenabled = false\n").unwrap();
        let project: RecipesConfig =
            toml::from_str("[\"cleanup/double-negation\"]\nenabled = true\n").unwrap();
        let merged = global.merge(project);
        assert_eq!(
            merged.0["cleanup/double-negation"].enabled,
            Some(true)
        );
    }
}
