//! Exception policy: per-option classification of known divergences.
//!
//! Policy files use the same INI grammar as option files:
//!
//! ```ini
//! [Server_Port_]
//! Timestamp = ignore
//! Mtu = default
//! * = unequal
//! ```
//!
//! Section and option names are normalized with [`normalize`] on both the
//! policy side and the lookup side, so `Server_Port_1` and `Server_Port_2`
//! share one entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::IniError;
use crate::parser::{parse_lines, IniEvent};

/// Option key that matches every option of a policy section.
pub const WILDCARD_OPTION: &str = "*";

/// Outcome of resolving a divergent option against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Known noise (timestamps, paths); never fails a file.
    Ignore,
    /// One backend writes an explicit default the other leaves implicit.
    Default,
    /// A genuine divergence.
    Unequal,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Ignore => "ignore",
            Classification::Default => "default",
            Classification::Unequal => "unequal",
        }
    }

    /// Whether a divergence with this classification fails the file.
    pub fn is_failure(&self) -> bool {
        matches!(self, Classification::Unequal)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Classification::Ignore),
            "default" => Ok(Classification::Default),
            "unequal" => Ok(Classification::Unequal),
            _ => Err(s.to_string()),
        }
    }
}

/// Strip leading and trailing ASCII digits from a section or option name.
///
/// `Port_1` and `Port_2` both normalize to `Port_`; `2ndLink3` to `ndLink`.
pub fn normalize(name: &str) -> String {
    name.trim_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Policy file name for an options file name.
///
/// Digits are stripped from the stem and the extension is kept, so every
/// numbered variant of an options file shares one policy file
/// (`Port_Settings2.ini` -> `Port_Settings.ini`).
pub fn policy_file_name(options_file_name: &str) -> String {
    match options_file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.{}", normalize(stem), ext),
        _ => normalize(options_file_name),
    }
}

/// Classification table keyed by normalized (section, option).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionPolicy {
    entries: BTreeMap<String, BTreeMap<String, Classification>>,
}

impl ExceptionPolicy {
    /// An empty policy: every lookup resolves to `Unequal`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse policy text.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut policy = Self::new();
        let mut current: Option<String> = None;

        for event in parse_lines(text)? {
            match event {
                IniEvent::Section { name, .. } => {
                    let key = normalize(&name);
                    policy.entries.entry(key.clone()).or_default();
                    current = Some(key);
                }
                IniEvent::Option { line, key, value } => {
                    let section = current.as_ref().ok_or_else(|| IniError::OptionOutsideSection {
                        line,
                        text: format!("{} = {}", key, value),
                    })?;
                    let tag = value
                        .parse::<Classification>()
                        .map_err(|value| IniError::UnknownClassification { line, value })?;
                    policy.insert(section, &key, tag);
                }
                IniEvent::Continuation { line, text } => {
                    return Err(IniError::MalformedLine { line, text });
                }
            }
        }

        Ok(policy)
    }

    /// Load a policy file; a missing file yields an empty policy.
    pub fn load(path: &Path) -> Result<Self, IniError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => match IniError::from_io(path, e) {
                IniError::NotFound(_) => Ok(Self::new()),
                other => Err(other),
            },
        }
    }

    /// Record a classification; both names are normalized.
    pub fn insert(&mut self, section: &str, option: &str, tag: Classification) {
        self.entries
            .entry(normalize(section))
            .or_default()
            .insert(normalize(option), tag);
    }

    /// Resolve the classification of a divergent `section.option`.
    ///
    /// Exact option entries win over the section's `*` entry; anything
    /// unresolved is `Unequal`.
    pub fn classify(&self, section: &str, option: &str) -> Classification {
        let Some(options) = self.entries.get(&normalize(section)) else {
            return Classification::Unequal;
        };
        options
            .get(&normalize(option))
            .or_else(|| options.get(WILDCARD_OPTION))
            .copied()
            .unwrap_or(Classification::Unequal)
    }

    /// Number of (section, option) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
