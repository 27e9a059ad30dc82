// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration loaded from TOML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default first placeholder in `argv`
pub const DEFAULT_PROGRAM: &str = "cli";
/// Default second placeholder in `argv`
pub const DEFAULT_SCRIPT: &str = "/path/to/cli";

/// Errors that can occur when loading a harness config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings shared by every invocation built with them.
///
/// ```toml
/// program = "mytool"
/// script = "/usr/local/bin/mytool"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Value of `argv[0]`
    pub program: String,

    /// Value of `argv[1]`
    pub script: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load a config from a TOML or JSON file, chosen by extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build an argument vector: the two placeholders, then `args`.
    pub fn argv<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        [self.program.clone(), self.script.clone()]
            .into_iter()
            .chain(args.into_iter().map(Into::into))
            .collect()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
