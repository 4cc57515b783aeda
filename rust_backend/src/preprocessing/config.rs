//! Pipeline configuration file support.
//!
//! Settings are read from TOML. Every field has a default, so an empty file
//! is a valid configuration:
//!
//! ```toml
//! excluded_providers = ["P3"]
//! strip_columns = ["NodeName", "StartNode", "EndNode"]
//! validate = true
//! strict = false
//!
//! [balance]
//! client_node_name = "Cliente Add"
//! provider_node_name = "Prov Add"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::domain::{END_NODE, NODE_NAME, START_NODE};
use crate::core::error::{PrepError, PrepResult};
use crate::transformations::BalanceConfig;

/// Configuration for the preprocessing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Providers removed before balancing.
    #[serde(default)]
    pub excluded_providers: Vec<String>,
    /// Text columns trimmed in both input frames, where present.
    #[serde(default = "default_strip_columns")]
    pub strip_columns: Vec<String>,
    #[serde(default = "default_true")]
    pub validate: bool,
    /// Fail on validation errors, dangling edges and unknown excluded providers.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub balance: BalanceConfig,
}

fn default_strip_columns() -> Vec<String> {
    [NODE_NAME, START_NODE, END_NODE]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            excluded_providers: Vec::new(),
            strip_columns: default_strip_columns(),
            validate: true,
            strict: false,
            balance: BalanceConfig::default(),
        }
    }
}

impl PreprocessConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> PrepResult<Self> {
        toml::from_str(content).map_err(|e| {
            PrepError::Configuration(format!("Failed to parse config: {}", e))
        })
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(PreprocessConfig)` if successful
    /// * `Err(PrepError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PrepError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Builder-style helper to set the excluded providers.
    pub fn with_excluded_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_providers = providers.into_iter().map(Into::into).collect();
        self
    }
}
