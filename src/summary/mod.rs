//! Run summary and exit codes for batch comparisons

mod failure;
mod project;
mod run_summary;

pub use failure::{exit_code_for, Status, EXIT_CODE_MAX, EXIT_USAGE};
pub use project::ProjectResult;
pub use run_summary::{RunSummary, RUN_SUMMARY_SCHEMA_ID, RUN_SUMMARY_SCHEMA_VERSION};
