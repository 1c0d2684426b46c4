//! Spy configuration, loaded from `spybase.toml`.
//!
//! ```toml
//! log_scope = "per_type"
//! reserved_patterns = ["^_internal_"]
//! ```

use crate::core::error::SpyError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "spybase.toml";

/// Where a spy's call records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogScope {
    /// Every spy built from one capability appends to the capability's log.
    #[default]
    Shared,
    /// Each spy gets a fresh log of its own.
    PerType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpyConfig {
    pub log_scope: LogScope,
    /// Extra member-name patterns (regex) that are never intercepted, on top
    /// of the always-reserved `__name__` hooks.
    pub reserved_patterns: Vec<String>,
}

impl SpyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SpyError> {
        toml::from_str(content).map_err(|e| SpyError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SpyError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn name_policy(&self) -> Result<NamePolicy, SpyError> {
        NamePolicy::new(&self.reserved_patterns)
    }
}

/// Load `<dir>/spybase.toml`. A missing file means defaults, not an error.
pub fn load_config(dir: &Path) -> Result<SpyConfig, SpyError> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        return SpyConfig::load(&config_path);
    }
    Ok(SpyConfig::default())
}

/// Decides which member names are runtime hooks rather than interceptable
/// members.
#[derive(Debug, Clone, Default)]
pub struct NamePolicy {
    extra: Vec<Regex>,
}

impl NamePolicy {
    pub fn new(patterns: &[String]) -> Result<Self, SpyError> {
        let extra = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { extra })
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        is_dunder(name) || self.extra.iter().any(|re| re.is_match(name))
    }
}

fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}
