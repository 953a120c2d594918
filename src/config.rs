//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsarchive/rsarchive.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `RSARCHIVE_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Template rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TemplateConfig {
    /// Engine applied when a request names none (e.g. "jinja")
    pub default_engine: Option<String>,
    /// Values exposed to templates as `vars.<name>`
    pub vars: BTreeMap<String, String>,
}

/// Raw template config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTemplateConfig {
    pub default_engine: Option<String>,
    pub vars: Option<BTreeMap<String, String>>,
}

impl TemplateConfig {
    /// Merge overlay config onto self (base).
    ///
    /// - `default_engine`: overlay wins if Some
    /// - `vars`: union, overlay wins per key
    pub fn merge(&self, overlay: &RawTemplateConfig) -> Self {
        let mut vars = self.vars.clone();
        if let Some(extra) = &overlay.vars {
            vars.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self {
            default_engine: overlay
                .default_engine
                .clone()
                .or_else(|| self.default_engine.clone()),
            vars,
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub shell: Option<String>,
    pub search_path: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub template: RawTemplateConfig,
}

/// Unified configuration for rsarchive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Shell used to run command lines (`<shell> -c <command>`)
    pub shell: String,
    /// Directories searched for archive binaries (empty: `$PATH`)
    pub search_path: Vec<PathBuf>,
    /// Template rendering settings
    pub template: TemplateConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: "sh".into(),
            search_path: vec![],
            template: TemplateConfig::default(),
        }
    }
}

/// Get the XDG config directory for rsarchive.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsarchive").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsarchive.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~` and `$VAR`, leaving the input untouched if a variable is unset.
fn expand(value: &str) -> String {
    shellexpand::full(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.shell = expand(&self.shell);
        self.search_path = self
            .search_path
            .iter()
            .map(|p| PathBuf::from(expand(p.to_string_lossy().as_ref())))
            .collect();
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - `search_path`: replaced if specified
    /// - `template.vars`: union, overlay wins per key
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            shell: overlay.shell.clone().unwrap_or_else(|| self.shell.clone()),
            search_path: overlay
                .search_path
                .clone()
                .unwrap_or_else(|| self.search_path.clone()),
            template: self.template.merge(&overlay.template),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (replace)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply RSARCHIVE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSARCHIVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("search_path"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("shell") {
            settings.shell = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("search_path") {
            settings.search_path = val.into_iter().map(PathBuf::from).collect();
        }
        if let Ok(val) = config.get_string("template.default_engine") {
            settings.template.default_engine = Some(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_uses_sh_and_path() {
        let settings = Settings::default();
        assert_eq!(settings.shell, "sh");
        assert!(settings.search_path.is_empty());
        assert_eq!(settings.template.default_engine, None);
    }

    #[test]
    fn given_tilde_in_search_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            search_path: vec![PathBuf::from("~/bin")],
            ..Settings::default()
        };

        settings.expand_paths();

        assert!(!settings.search_path[0].to_string_lossy().starts_with('~'));
        assert!(settings.search_path[0].to_string_lossy().ends_with("bin"));
    }

    #[test]
    fn given_unset_variable_when_expand_then_keeps_input() {
        assert_eq!(
            expand("$RSARCHIVE_SURELY_UNSET_VAR/sh"),
            "$RSARCHIVE_SURELY_UNSET_VAR/sh"
        );
    }

    #[test]
    fn test_merge_template_vars_union_overlay_wins() {
        let base = TemplateConfig {
            default_engine: Some("tera".into()),
            vars: BTreeMap::from([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]),
        };
        let overlay = RawTemplateConfig {
            default_engine: None,
            vars: Some(BTreeMap::from([
                ("b".to_string(), "20".to_string()),
                ("c".to_string(), "3".to_string()),
            ])),
        };

        let merged = base.merge(&overlay);

        assert_eq!(merged.default_engine.as_deref(), Some("tera"));
        assert_eq!(merged.vars.get("a").map(String::as_str), Some("1"));
        assert_eq!(merged.vars.get("b").map(String::as_str), Some("20"));
        assert_eq!(merged.vars.get("c").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_merge_with_replaces_search_path() {
        let base = Settings {
            search_path: vec![PathBuf::from("/usr/bin")],
            ..Settings::default()
        };
        let overlay = RawSettings {
            shell: Some("bash".into()),
            search_path: Some(vec![PathBuf::from("/opt/rar/bin")]),
            template: RawTemplateConfig::default(),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.shell, "bash");
        assert_eq!(merged.search_path, vec![PathBuf::from("/opt/rar/bin")]);
    }

    #[test]
    fn test_merge_with_keeps_base_when_not_specified() {
        let base = Settings {
            shell: "zsh".into(),
            ..Settings::default()
        };

        let merged = base.merge_with(&RawSettings::default());

        assert_eq!(merged, base);
    }
}
