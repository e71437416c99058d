//! Comparison of backend output trees
//!
//! Finds the ports and options files every backend produced, diffs each
//! file across backends and renders one table per file.

mod comparator;
mod scan;

use std::io;
use std::path::PathBuf;

use confdiff_ini::IniError;

pub use comparator::{CheckOutcome, Comparator, FileOutcome, OutputSet};
pub use scan::{common_files, common_ports, derive_labels, discover_projects};

/// Comparison errors
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{}: {source}", path.display())]
    Ini {
        path: PathBuf,
        #[source]
        source: IniError,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(String),
}
