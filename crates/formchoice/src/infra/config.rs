//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::infra::resources::ResourceBundle;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".formchoice/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default = "Select::unset")]
    pub select: Select,
    #[serde(default)]
    pub resources: ResourceBundle,
}

/// Defaults applied to every single-select choice built from this configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    #[serde(default)]
    null_valid: Option<bool>,
    #[serde(default)]
    no_selection_value: Option<String>,
    #[serde(default)]
    required: Option<bool>,
}

impl Select {
    /// A section that overrides nothing when merged.
    fn unset() -> Self {
        Self {
            null_valid: None,
            no_selection_value: None,
            required: None,
        }
    }

    fn default_null_valid() -> bool {
        false
    }

    fn default_no_selection_value() -> &'static str {
        "-1"
    }

    fn default_required() -> bool {
        false
    }

    pub fn null_valid(&self) -> bool {
        self.null_valid.unwrap_or_else(Self::default_null_valid)
    }

    pub fn no_selection_value(&self) -> String {
        self.no_selection_value
            .clone()
            .unwrap_or_else(|| Self::default_no_selection_value().to_owned())
    }

    pub fn required(&self) -> bool {
        self.required.unwrap_or_else(Self::default_required)
    }
}

impl Default for Select {
    fn default() -> Self {
        Self {
            null_valid: Some(Self::default_null_valid()),
            no_selection_value: Some(Self::default_no_selection_value().to_owned()),
            required: Some(Self::default_required()),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    null_valid: Option<bool>,
    no_selection_value: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            null_valid: env::var("FORMCHOICE_NULL_VALID")
                .ok()
                .and_then(|value| parse_flag(&value)),
            no_selection_value: env::var("FORMCHOICE_NO_SELECTION_VALUE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(null_valid: bool, no_selection_value: &str) -> Self {
        Self {
            null_valid: Some(null_valid),
            no_selection_value: Some(no_selection_value.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            select: merge_select(self.select, other.select),
            resources: self.resources.merge(other.resources),
        }
    }
}

fn merge_select(mut base: Select, overlay: Select) -> Select {
    if let Some(value) = overlay.null_valid {
        base.null_valid = Some(value);
    }
    if let Some(value) = overlay.no_selection_value {
        base.no_selection_value = Some(value);
    }
    if let Some(value) = overlay.required {
        base.required = Some(value);
    }
    base
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("formchoice/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(null_valid) = env.null_valid {
        config.select.null_valid = Some(null_valid);
    }
    if let Some(value) = env.no_selection_value {
        config.select.no_selection_value = Some(value);
    }
    config
}
