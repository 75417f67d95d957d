//! Executor configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for `BuiltinExecutor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Suppress informational output (errors are always logged)
    pub quiet: bool,
    /// Number of executed commands kept for recall
    pub history_size: usize,
    /// How many synthesized commands a single `execute` may chain
    pub max_redispatch_depth: usize,
    /// Accept the unregistered `ShowPicture(path)` command
    pub legacy_show_picture: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            history_size: 100,
            max_redispatch_depth: 1,
            legacy_show_picture: false,
        }
    }
}

impl ExecutorConfig {
    /// Load a configuration from a JSON document; absent fields take defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExecutorConfig::from_json(r#"{ "quiet": true }"#).unwrap();
        assert!(config.quiet);
        assert_eq!(config.history_size, 100);
        assert_eq!(config.max_redispatch_depth, 1);
        assert!(!config.legacy_show_picture);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ExecutorConfig::from_json("{ quiet").unwrap_err();
        assert!(err.to_string().starts_with("invalid executor config"));
    }
}
