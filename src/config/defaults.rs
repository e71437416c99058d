//! Built-in defaults (layer 1)
//!
//! Naming conventions of the backend output trees and report settings.

use serde::{Deserialize, Serialize};

/// Port directories: `Client_Port_1`, `Server_Port_12`, ...
pub const DEFAULT_PORT_PATTERN: &str = r"^(Client|Server)_Port_\d+$";

/// Options files inside a port directory.
pub const DEFAULT_FILE_PATTERN: &str = r"^[\w.]+\.ini$";

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Regex matched against port directory names
    pub port_pattern: String,

    /// Regex matched against options file names
    pub file_pattern: String,

    /// Directory holding exception policy files (default: "exceptions")
    pub policy_dir: String,

    /// Color mode: auto, always or never (default: "auto")
    pub color: String,

    /// Text printed for files without differences
    pub placeholder: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            port_pattern: DEFAULT_PORT_PATTERN.to_string(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            policy_dir: "exceptions".to_string(),
            color: "auto".to_string(),
            placeholder: confdiff_table::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "port_pattern": self.port_pattern,
            "file_pattern": self.file_pattern,
            "policy": {
                "dir": self.policy_dir
            },
            "output": {
                "color": self.color,
                "placeholder": self.placeholder
            }
        })
    }
}
