//! INI option documents and exception policies.
//!
//! Backends emit their compiled configuration as INI files. This crate
//! reads those files into [`ConfigDocument`]s and loads the
//! [`ExceptionPolicy`] tables that decide how a divergent option is
//! classified.

mod document;
mod error;
mod parser;
mod policy;

pub use document::{ConfigDocument, Options};
pub use error::IniError;
pub use parser::{parse_lines, IniEvent};
pub use policy::{normalize, policy_file_name, Classification, ExceptionPolicy, WILDCARD_OPTION};
