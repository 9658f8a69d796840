//! Configuration loading.
//!
//! Two files are consulted, project entries overriding global ones by
//! recipe id:
//!
//! - `<config dir>/rejig/config.toml`
//! - `<project>/.rejig/config.toml`
//!
//! ```toml
//! [recipes."cleanup/collapse-nested-if"]
//! enabled = false
//!
//! [recipes."cleanup/remove-unused-imports"]
//! keep = ["javax.annotation.*"]
//! ```

use rejig_recipes::RecipesConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recipes: RecipesConfig,
}

impl Config {
    /// Load global config, then the project config under `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, String> {
        let mut config = Config::default();
        if let Some(dir) = dirs::config_dir() {
            config = config.merge_file(&dir.join("rejig").join("config.toml"))?;
        }
        config.merge_file(&project_root.join(".rejig").join("config.toml"))
    }

    fn merge_file(self, path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(self);
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let other: Config = toml::from_str(&text)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
        Ok(Config {
            recipes: self.recipes.merge(other.recipes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recipe_overrides() {
        let config: Config = toml::from_str(
            r#"
[recipes."cleanup/double-negation"]
enabled = false

[recipes."cleanup/remove-unused-imports"]
keep = ["javax.annotation.*"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.recipes.0["cleanup/double-negation"].enabled,
            Some(false)
        );
        assert!(
            config.recipes.0["cleanup/remove-unused-imports"]
                .options
                .contains_key("keep")
        );
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default()
            .merge_file(&dir.path().join("absent.toml"))
            .unwrap();
        assert!(config.recipes.0.is_empty());
    }

    #[test]
    fn project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        std::fs::write(&global, "[recipes.\"cleanup/double-negation\"]\nenabled = false\n")
            .unwrap();
        std::fs::write(&project, "[recipes.\"cleanup/double-negation\"]\nenabled = true\n")
            .unwrap();

        let config = Config::default()
            .merge_file(&global)
            .unwrap()
            .merge_file(&project)
            .unwrap();
        assert_eq!(
            config.recipes.0["cleanup/double-negation"].enabled,
            Some(true)
        );
    }
}
