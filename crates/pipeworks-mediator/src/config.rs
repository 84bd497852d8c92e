//! Notification names the mediator listens for

use serde::{Deserialize, Serialize};

/// Host notification names that announce new pipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Notification carrying a pipe to register as INPUT
    pub accept_input_pipe: String,

    /// Notification carrying a pipe to register as OUTPUT
    pub accept_output_pipe: String,
}

impl MediatorConfig {
    pub fn new() -> Self {
        Self {
            accept_input_pipe: "acceptInputPipe".to_string(),
            accept_output_pipe: "acceptOutputPipe".to_string(),
        }
    }

    pub fn from_json_str(contents: &str) -> anyhow::Result<Self> {
        let config = serde_json::from_str(contents)?;
        Ok(config)
    }
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MediatorConfig::new();
        assert_eq!(config.accept_input_pipe, "acceptInputPipe");
        assert_eq!(config.accept_output_pipe, "acceptOutputPipe");
    }

    #[test]
    fn test_override_one_name() {
        let config =
            MediatorConfig::from_json_str(r#"{"accept_output_pipe": "shell/out"}"#).unwrap();
        assert_eq!(config.accept_input_pipe, "acceptInputPipe");
        assert_eq!(config.accept_output_pipe, "shell/out");
    }
}
