//! Normalization configuration types.

use crate::error::{FolError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the CNF pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Largest number of instances a closed-world existential may expand into
    pub domain_expansion_limit: usize,
    /// Allow Skolem functions for existentials under universal quantifiers.
    /// When false such existentials are rejected instead of skolemized.
    pub skolem_functions: bool,
    /// Name prefix of minted Skolem symbols
    pub skolem_prefix: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            domain_expansion_limit: 4096,
            skolem_functions: true,
            skolem_prefix: "sk".to_string(),
        }
    }
}

impl NormalizeConfig {
    pub fn with_expansion_limit(limit: usize) -> Self {
        NormalizeConfig {
            domain_expansion_limit: limit,
            ..NormalizeConfig::default()
        }
    }

    /// Load from a JSON object; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NormalizeConfig =
            serde_json::from_str(json).map_err(|e| FolError::Config(e.to_string()))?;
        if config.skolem_prefix.is_empty() || config.skolem_prefix.chars().any(char::is_whitespace) {
            return Err(FolError::Config(format!(
                "skolem prefix `{}` must be non-empty without whitespace",
                config.skolem_prefix
            )));
        }
        Ok(config)
    }
}
