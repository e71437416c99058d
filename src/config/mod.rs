//! Configuration merge system
//!
//! Implements the 3-layer configuration merge:
//! 1. Built-in defaults
//! 2. Repo config (.confdiff.toml)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::{BuiltinDefaults, DEFAULT_FILE_PATTERN, DEFAULT_PORT_PATTERN};
pub use effective::{
    ColorMode, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, Settings, REPO_CONFIG_FILE,
};
pub use merge::{deep_merge, merge_layers};
