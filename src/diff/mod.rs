//! Multi-source configuration diff
//!
//! Merges N option documents for the same logical file into one structural
//! model keyed by (section, option), keeps the entries whose values disagree
//! and classifies each of them against the exception policy.

mod engine;
mod report;

pub use engine::{diff, distinct_count, DiffCounts, DiffReport, DiffRow, SectionPresenceRow, Source, ABSENT};
pub use report::{CLASS_COLUMN, OPTION_INDENT};
