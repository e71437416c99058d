//! Project status and process exit codes

use serde::{Deserialize, Serialize};

/// Exit code for usage and configuration errors.
pub const EXIT_USAGE: i32 = 2;

/// Largest exit code a process can report.
pub const EXIT_CODE_MAX: i32 = 255;

/// Outcome of checking one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every compared file is free of `unequal` divergences
    Passed,
    /// At least one file has an `unequal` divergence
    Failed,
    /// The comparison could not complete
    Errored,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Errored => "errored",
        }
    }

    /// Whether this status counts towards the exit code
    pub fn is_failure(&self) -> bool {
        !matches!(self, Status::Passed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit code for a number of failed projects, clamped to the process range.
pub fn exit_code_for(failed: usize) -> i32 {
    i32::try_from(failed).map_or(EXIT_CODE_MAX, |n| n.min(EXIT_CODE_MAX))
}
