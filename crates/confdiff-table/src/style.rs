//! Row styles and the style lookup injected into the renderer.

use colored::Color;
use serde::Serialize;
use std::collections::BTreeMap;

/// Style tag attached to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Plain,
    Bold,
    Dim,
    Red,
    Green,
    Yellow,
}

/// Start/end markers wrapped around a styled row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Marker {
    pub start: String,
    pub end: String,
}

impl Marker {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "1";
const ANSI_DIM: &str = "2";

fn sgr(code: &str) -> Marker {
    Marker::new(format!("\x1b[{}m", code), ANSI_RESET)
}

/// Immutable style -> marker lookup.
///
/// Styles without an entry render unwrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    markers: BTreeMap<Style, Marker>,
}

impl StyleSheet {
    /// No markers at all.
    pub fn plain() -> Self {
        Self::default()
    }

    /// ANSI SGR escape sequences.
    pub fn ansi() -> Self {
        Self::plain()
            .with(Style::Bold, sgr(ANSI_BOLD))
            .with(Style::Dim, sgr(ANSI_DIM))
            .with(Style::Red, sgr(&Color::Red.to_fg_str()))
            .with(Style::Green, sgr(&Color::Green.to_fg_str()))
            .with(Style::Yellow, sgr(&Color::Yellow.to_fg_str()))
    }

    /// Set the markers of one style.
    pub fn with(mut self, style: Style, marker: Marker) -> Self {
        self.markers.insert(style, marker);
        self
    }

    pub fn marker(&self, style: Style) -> Option<&Marker> {
        self.markers.get(&style)
    }

    /// Wrap `text` in the markers of `style`.
    pub fn paint(&self, style: Style, text: &str) -> String {
        match self.marker(style) {
            Some(m) => format!("{}{}{}", m.start, text, m.end),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_never_wraps() {
        let sheet = StyleSheet::plain();
        assert_eq!(sheet.paint(Style::Red, "row"), "row");
        assert_eq!(sheet.paint(Style::Bold, "row"), "row");
    }

    #[test]
    fn test_ansi_markers() {
        let sheet = StyleSheet::ansi();
        assert_eq!(sheet.paint(Style::Red, "x"), "\x1b[31mx\x1b[0m");
        assert_eq!(sheet.paint(Style::Green, "x"), "\x1b[32mx\x1b[0m");
        assert_eq!(sheet.paint(Style::Bold, "x"), "\x1b[1mx\x1b[0m");
        assert_eq!(sheet.paint(Style::Plain, "x"), "x");
    }

    #[test]
    fn test_custom_marker() {
        let sheet = StyleSheet::plain().with(Style::Yellow, Marker::new("<y>", "</y>"));
        assert_eq!(sheet.paint(Style::Yellow, "warn"), "<y>warn</y>");
        assert_eq!(sheet.paint(Style::Red, "err"), "err");
    }
}
