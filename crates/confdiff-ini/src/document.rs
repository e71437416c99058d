//! In-memory INI option document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::IniError;
use crate::parser::{parse_lines, IniEvent};

/// Options of a single section, keyed by option name.
pub type Options = BTreeMap<String, String>;

/// Parsed INI file: section name -> option name -> value.
///
/// Names are case-sensitive. A section that is present but empty is
/// distinct from an absent one, and so is an option with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: BTreeMap<String, Options>,
}

impl ConfigDocument {
    /// Create an empty document (every section absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut sections: BTreeMap<String, Options> = BTreeMap::new();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for event in parse_lines(text)? {
            match event {
                IniEvent::Section { line, name } => {
                    if sections.contains_key(&name) {
                        return Err(IniError::DuplicateSection {
                            line,
                            section: name,
                        });
                    }
                    sections.insert(name.clone(), Options::new());
                    current = Some(name);
                    last_key = None;
                }
                IniEvent::Option { line, key, value } => {
                    let section = current.as_ref().ok_or_else(|| IniError::OptionOutsideSection {
                        line,
                        text: format!("{} = {}", key, value),
                    })?;
                    if let Some(options) = sections.get_mut(section) {
                        options.insert(key.clone(), value);
                    }
                    last_key = Some(key);
                }
                IniEvent::Continuation { text, .. } => {
                    // The tokenizer only emits continuations after an option.
                    if let (Some(section), Some(key)) = (&current, &last_key) {
                        if let Some(value) = sections.get_mut(section).and_then(|o| o.get_mut(key)) {
                            value.push('\n');
                            value.push_str(&text);
                        }
                    }
                }
            }
        }

        Ok(Self { sections })
    }

    /// Load and parse an INI file.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the file does not exist
    /// - `Io` for any other read failure
    /// - a grammar error when the file is malformed
    pub fn load(path: &Path) -> Result<Self, IniError> {
        let text = fs::read_to_string(path).map_err(|e| IniError::from_io(path, e))?;
        Self::parse(&text)
    }

    /// Load an INI file, treating a missing file as an empty document.
    ///
    /// Backends do not always emit every file; the comparison should still
    /// run and report the missing sections.
    pub fn load_or_empty(path: &Path) -> Result<Self, IniError> {
        match Self::load(path) {
            Err(e) if e.is_not_found() => Ok(Self::new()),
            other => other,
        }
    }

    /// Section names in iteration order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Options of a section, or `None` when the section is absent.
    pub fn options(&self, section: &str) -> Option<&Options> {
        self.sections.get(section)
    }

    /// Value of `section.option`, or `None` when either is absent.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|o| o.get(option))
            .map(String::as_str)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Insert (or replace) an option, creating the section when needed.
    pub fn set(&mut self, section: &str, option: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.to_string());
    }

    /// Add an empty section if it does not exist yet.
    pub fn add_section(&mut self, section: &str) {
        self.sections.entry(section.to_string()).or_default();
    }

    /// Serialize back to INI text.
    ///
    /// Multi-line values are written as indented continuation lines, so
    /// parsing the output yields an equal document.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for (section, options) in &self.sections {
            out.push('[');
            out.push_str(section);
            out.push_str("]\n");
            for (key, value) in options {
                let mut lines = value.split('\n');
                out.push_str(key);
                out.push_str(" =");
                if let Some(first) = lines.next().filter(|l| !l.is_empty()) {
                    out.push(' ');
                    out.push_str(first);
                }
                out.push('\n');
                for cont in lines {
                    out.push_str("    ");
                    out.push_str(cont);
                    out.push('\n');
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = "\
[Port]
Address = 10.0.0.1
Mtu = 1500

[Empty]

[Flags]
Enabled =
";

    #[test]
    fn test_parse_sample() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.section_count(), 3);
        assert_eq!(doc.get("Port", "Address"), Some("10.0.0.1"));
        assert_eq!(doc.get("Port", "Mtu"), Some("1500"));
        assert!(doc.has_section("Empty"));
        assert!(doc.options("Empty").unwrap().is_empty());
        assert_eq!(doc.get("Flags", "Enabled"), Some(""));
        assert_eq!(doc.get("Flags", "Missing"), None);
        assert_eq!(doc.get("Nope", "Address"), None);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let doc = ConfigDocument::parse("[Port]\nmtu = 1\nMTU = 2\n").unwrap();
        assert_eq!(doc.get("Port", "mtu"), Some("1"));
        assert_eq!(doc.get("Port", "MTU"), Some("2"));
        assert!(!doc.has_section("port"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let err = ConfigDocument::parse("[A]\nx=1\n[A]\ny=2\n").unwrap_err();
        assert!(matches!(err, IniError::DuplicateSection { line: 3, ref section } if section == "A"));
    }

    #[test]
    fn test_option_outside_section_rejected() {
        let err = ConfigDocument::parse("x = 1\n[A]\n").unwrap_err();
        assert!(matches!(err, IniError::OptionOutsideSection { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_option_last_wins() {
        let doc = ConfigDocument::parse("[A]\nx = 1\nx = 2\n").unwrap();
        assert_eq!(doc.get("A", "x"), Some("2"));
    }

    #[test]
    fn test_trailing_comments_ignored() {
        let doc = ConfigDocument::parse("[S] ; port section\nx = 1 ; generated\n").unwrap();
        assert!(doc.has_section("S"));
        assert_eq!(doc.get("S", "x"), Some("1"));
    }

    #[test]
    fn test_continuation_joined_with_newline() {
        let doc = ConfigDocument::parse("[A]\nlist = one\n  two\n  three\n").unwrap();
        assert_eq!(doc.get("A", "list"), Some("one\ntwo\nthree"));
    }

    #[test]
    fn test_round_trip_preserves_keys_and_values() {
        let mut doc = ConfigDocument::new();
        doc.set("Server_Port_1", "Name", "srv one");
        doc.set("Server_Port_1", "Url", "http://a:80/?q=1");
        doc.set("Server_Port_1", "Blank", "");
        doc.set("Client", "Lines", "first\nsecond");
        doc.set("Client", "Leading", "\nafter");
        doc.add_section("Bare");

        let reparsed = ConfigDocument::parse(&doc.to_ini_string()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "{}", SAMPLE).unwrap();

        let doc = ConfigDocument::load(temp.path()).unwrap();
        assert_eq!(doc.get("Port", "Mtu"), Some("1500"));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDocument::load(&dir.path().join("absent.ini")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = TempDir::new().unwrap();
        let doc = ConfigDocument::load_or_empty(&dir.path().join("absent.ini")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_load_or_empty_still_rejects_malformed() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "orphan = 1").unwrap();
        assert!(ConfigDocument::load_or_empty(temp.path()).is_err());
    }
}
