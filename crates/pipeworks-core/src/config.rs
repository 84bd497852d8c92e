//! Configuration for pipe fittings

use crate::types::{Priority, QueueMode};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied when building queues and messages from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipesConfig {
    /// Release order for newly built queues
    pub default_queue_mode: QueueMode,

    /// Priority for newly built messages
    pub default_priority: Priority,
}

impl PipesConfig {
    pub fn new() -> Self {
        Self {
            default_queue_mode: QueueMode::Sort,
            default_priority: Priority::Normal,
        }
    }

    pub fn from_json_str(contents: &str) -> anyhow::Result<Self> {
        let config = serde_json::from_str(contents)?;
        Ok(config)
    }

    /// Load from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading pipes config {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("parsing pipes config {}", path.display()))
    }
}

impl Default for PipesConfig {
    fn default() -> Self {
        Self::new()
    }
}
