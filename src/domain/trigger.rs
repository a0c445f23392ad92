use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Development activity that can cause a reminder check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// A build / compilation finished.
    Compilation,
    /// A run or debug process terminated.
    ProcessTermination,
    /// The indexer started (project entered indexing mode).
    Indexing,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [
        TriggerKind::Compilation,
        TriggerKind::ProcessTermination,
        TriggerKind::Indexing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Compilation => "compilation",
            TriggerKind::ProcessTermination => "process_termination",
            TriggerKind::Indexing => "indexing",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum TriggerKindError {
    #[error("unknown trigger kind: {0} (expected compilation|process_termination|indexing)")]
    Unknown(String),
}

impl FromStr for TriggerKind {
    type Err = TriggerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // host adapters use either our names or the event names
        match s.trim().to_ascii_lowercase().as_str() {
            "compilation" | "build-finished" | "build_finished" => Ok(TriggerKind::Compilation),
            "process_termination" | "process-terminated" | "process_terminated" => {
                Ok(TriggerKind::ProcessTermination)
            }
            "indexing" | "indexing-started" | "indexing_started" => Ok(TriggerKind::Indexing),
            other => Err(TriggerKindError::Unknown(other.to_string())),
        }
    }
}
