//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstag/rstag.toml`
//! 3. Local config: `./.rstag.toml`
//! 4. Environment variables: `RSTAG_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Unified configuration for rstag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Standing tag specs loaded into every store (e.g. "work/urgent")
    pub tags: Vec<String>,
    /// Assign a generated color to every newly created tag
    pub auto_color: bool,
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified" during layered merging).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tags: Option<Vec<String>>,
    pub auto_color: Option<bool>,
}

/// Get the XDG config directory for rstag.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstag").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstag.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rstag.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| StoreError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge spec lists with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item
    /// - Duplicates are de-duplicated, output is sorted for determinism
    pub fn merge_specs(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for spec in overlay {
            if let Some(negated) = spec.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(spec.clone());
            }
        }

        let mut specs: Vec<String> = result.into_iter().collect();
        specs.sort();
        specs
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalars: overlay wins if Some, otherwise keep base
    /// - `tags`: union merge with negation support (if overlay specified)
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tags: overlay
                .tags
                .as_ref()
                .map(|o| Self::merge_specs(&self.tags, o))
                .unwrap_or_else(|| self.tags.clone()),
            auto_color: overlay.auto_color.unwrap_or(self.auto_color),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics: the
    /// global file defines the user's baseline, local config then adds
    /// on top via `merge_with`.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            tags: global.tags.clone().unwrap_or_else(|| self.tags.clone()),
            auto_color: global.auto_color.unwrap_or(self.auto_color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.rstag.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rstag/rstag.toml` (REPLACES defaults)
    /// 3. Local config: `<local_dir>/.rstag.toml` (`tags` UNION with global)
    /// 4. Environment variables: `RSTAG_*` prefix (REPLACES - explicit override)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, StoreError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply RSTAG_* environment variables as explicit overrides.
    ///
    /// Env vars replace values (not merge): `RSTAG_TAGS=work/urgent,home`
    /// and `RSTAG_AUTO_COLOR=true`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, StoreError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSTAG")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tags"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("tags") {
            settings.tags = val;
        }
        if let Ok(val) = config.get_bool("auto_color") {
            settings.auto_color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, StoreError> {
        toml::to_string_pretty(self).map_err(|e| StoreError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstag configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstag/rstag.toml  (defines your baseline)
#   Local:  ./.rstag.toml               (per-directory additions)
#   Env:    RSTAG_* environment variables (explicit overrides)
#
# The local `tags` list UNIONS with the global one. Use "!spec" in the
# local config to REMOVE an inherited spec:
#   tags = ["home/garden", "!work/legacy"]

# Standing tag specs, nested with '/'
# tags = ["work/urgent/today", "work/later", "home"]

# Assign a generated color to every newly created tag
# auto_color = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> StoreError {
    StoreError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_defaulting_then_is_empty_and_uncolored() {
        let settings = Settings::default();
        assert!(settings.tags.is_empty());
        assert!(!settings.auto_color);
    }

    #[test]
    fn test_merge_specs_union() {
        let base = vec!["work".to_string(), "home".to_string()];
        let overlay = vec!["hobby".to_string()];
        let result = Settings::merge_specs(&base, &overlay);

        assert!(result.contains(&"work".to_string()));
        assert!(result.contains(&"home".to_string()));
        assert!(result.contains(&"hobby".to_string()));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_merge_specs_negation() {
        let base = vec!["work".to_string(), "home".to_string()];
        let overlay = vec!["!work".to_string(), "hobby".to_string()];
        let result = Settings::merge_specs(&base, &overlay);

        assert!(!result.contains(&"work".to_string()), "work removed by !work");
        assert!(result.contains(&"home".to_string()));
        assert!(result.contains(&"hobby".to_string()));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_merge_specs_negation_nonexistent() {
        let base = vec!["work".to_string()];
        let overlay = vec!["!nope".to_string()];
        let result = Settings::merge_specs(&base, &overlay);
        assert_eq!(result, vec!["work".to_string()]);
    }

    #[test]
    fn given_local_overlay_when_merging_then_tags_union_and_scalars_override() {
        let base = Settings {
            tags: vec!["work/urgent".to_string()],
            auto_color: false,
        };
        let overlay: RawSettings =
            toml::from_str("tags = [\"home\"]\nauto_color = true").unwrap();

        let result = base.merge_with(&overlay);

        assert!(result.tags.contains(&"work/urgent".to_string()));
        assert!(result.tags.contains(&"home".to_string()));
        assert!(result.auto_color);
    }

    #[test]
    fn given_global_config_when_applying_then_tags_replace_defaults() {
        let base = Settings {
            tags: vec!["compiled-default".to_string()],
            auto_color: false,
        };
        let global: RawSettings = toml::from_str("tags = [\"work\"]").unwrap();

        let result = base.apply_global(&global);

        assert_eq!(result.tags, vec!["work".to_string()]);
        assert!(!result.auto_color, "unspecified scalar keeps base value");
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.tags.is_none(), "template ships fully commented out");
        assert!(raw.auto_color.is_none());
    }
}
