//! INI load errors.

use std::path::PathBuf;

/// Errors raised while reading an options or policy file.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: duplicate section [{section}]")]
    DuplicateSection { line: usize, section: String },

    #[error("line {line}: option outside of any section: {text}")]
    OptionOutsideSection { line: usize, text: String },

    #[error("line {line}: malformed line: {text}")]
    MalformedLine { line: usize, text: String },

    #[error("line {line}: unknown classification '{value}' (expected ignore, default or unequal)")]
    UnknownClassification { line: usize, value: String },
}

impl IniError {
    /// True when the error only reports that the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IniError::NotFound(_))
    }

    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IniError::NotFound(path.to_path_buf())
        } else {
            IniError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
