//! confdiff - cross-backend comparison of compiled INI configuration
//!
//! Two or more compilation backends emit a tree of port directories holding
//! INI options files. This crate diffs every options file they have in
//! common, classifies each divergence against an exception policy and
//! renders the differences as text tables.

pub mod compare;
pub mod config;
pub mod diff;
pub mod logging;
pub mod summary;

pub use compare::{CheckOutcome, CompareError, Comparator, OutputSet};
pub use config::{ConfigError, EffectiveConfig, Settings};
pub use diff::{diff, DiffReport, DiffRow, SectionPresenceRow, Source};
pub use summary::{ProjectResult, RunSummary};
