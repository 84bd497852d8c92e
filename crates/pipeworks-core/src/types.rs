//! Shared enums for message priority and fitting modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message priority. Lower rank is released first by a sorting queue.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    #[serde(rename = "HIGH")]
    High = 1,
    #[serde(rename = "MED")]
    Med = 5,
    #[default]
    #[serde(rename = "NORMAL")]
    Normal = 7,
    #[serde(rename = "LOW")]
    Low = 10,
}

impl Priority {
    /// Numeric rank used for ordering
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Whether a registered pipe carries messages into or out of a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeDirection {
    #[serde(rename = "INPUT")]
    Input,
    #[serde(rename = "OUTPUT")]
    Output,
}

impl fmt::Display for PipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeDirection::Input => f.write_str("input"),
            PipeDirection::Output => f.write_str("output"),
        }
    }
}

/// Filter operating mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Run the transform on data messages
    #[default]
    #[serde(rename = "FILTER")]
    Filter,
    /// Forward data messages untouched
    #[serde(rename = "BYPASS")]
    Bypass,
}

/// Queue release order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueMode {
    /// Stable priority order
    #[default]
    #[serde(rename = "SORT")]
    Sort,
    /// Insertion order
    #[serde(rename = "FIFO")]
    Fifo,
}
