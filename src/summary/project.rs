//! Per-project comparison results

use serde::{Deserialize, Serialize};

use super::failure::Status;
use crate::compare::{CheckOutcome, FileOutcome};

/// Result of comparing one project across backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResult {
    pub name: String,

    pub files_compared: usize,

    pub files_failed: usize,

    /// Per-file outcomes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileOutcome>,

    /// Error that stopped the comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectResult {
    pub fn from_outcome(name: impl Into<String>, outcome: &CheckOutcome) -> Self {
        Self {
            name: name.into(),
            files_compared: outcome.files_compared(),
            files_failed: outcome.files_failed(),
            files: outcome.files.clone(),
            error: None,
        }
    }

    pub fn errored(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files_compared: 0,
            files_failed: 0,
            files: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn status(&self) -> Status {
        if self.error.is_some() {
            Status::Errored
        } else if self.files_failed > 0 {
            Status::Failed
        } else {
            Status::Passed
        }
    }

    pub fn failed(&self) -> bool {
        self.status().is_failure()
    }
}
