//! Localized string lookup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Source of localized strings. Lookups never fail; a miss is `None`.
pub trait Localizer {
    fn get_string(&self, key: &str) -> Option<String>;
}

/// Localizer with no entries, so every caller falls back to its default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResources;

impl Localizer for NoResources {
    fn get_string(&self, _key: &str) -> Option<String> {
        None
    }
}

impl Localizer for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Flat key/value table of localized strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBundle {
    entries: HashMap<String, String>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a string, returning the bundle for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a bundle from a TOML file of `key = "value"` pairs.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read resource file: {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("failed to parse resource file: {}", path.display()))
    }

    /// Overlay `other` on top of this bundle; keys in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

impl Localizer for ResourceBundle {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Look up `key`, treating an empty string the same as a miss.
pub(crate) fn non_empty(localizer: &dyn Localizer, key: &str) -> Option<String> {
    localizer.get_string(key).filter(|value| !value.is_empty())
}
