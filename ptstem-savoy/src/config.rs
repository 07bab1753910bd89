//! Stemmer Configuration
//!
//! Which rule document to load and which words to leave untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;
use crate::loader::{BuiltinRules, JsonRuleLoader, RuleLoader};
use crate::rules::RuleSet;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "PTSTEM_CONFIG";

/// Where the rule tables come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    #[default]
    Builtin,
    Path(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemmerConfig {
    #[serde(default)]
    pub rules: RuleSource,
    /// Words returned unchanged by the stemmer.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl StemmerConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(RuleSetError::from)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), RuleSetError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_env_or_default() -> Result<Self, RuleSetError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_path(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn loader(&self) -> Box<dyn RuleLoader> {
        match &self.rules {
            RuleSource::Builtin => Box::new(BuiltinRules),
            RuleSource::Path(path) => Box::new(JsonRuleLoader::from_path(path.clone())),
        }
    }

    pub fn load_rules(&self) -> Result<RuleSet, RuleSetError> {
        self.loader().load()
    }
}
