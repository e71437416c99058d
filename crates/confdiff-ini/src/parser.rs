//! Line-level INI tokenizer.
//!
//! Splits INI text into section headers, option assignments and value
//! continuations. Structural checks (duplicate sections, options before the
//! first header) belong to the document builder.

use crate::error::IniError;

/// Comment prefixes recognized at the start of a line.
const COMMENT_PREFIXES: &[char] = &[';', '#'];

/// Starts an inline comment when preceded by whitespace.
const INLINE_COMMENT: char = ';';

/// Characters that separate an option name from its value.
const ASSIGNMENT_CHARS: &[char] = &['=', ':'];

/// A single meaningful INI line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniEvent {
    /// `[name]`
    Section { line: usize, name: String },

    /// `key = value` or `key: value`
    Option {
        line: usize,
        key: String,
        value: String,
    },

    /// Indented line extending the value of the preceding option.
    Continuation { line: usize, text: String },
}

impl IniEvent {
    /// 1-based source line of the event.
    pub fn line(&self) -> usize {
        match self {
            IniEvent::Section { line, .. }
            | IniEvent::Option { line, .. }
            | IniEvent::Continuation { line, .. } => *line,
        }
    }
}

/// Tokenize INI text.
///
/// Blank lines and full-line comments are dropped. Values are trimmed of
/// surrounding whitespace and lose a trailing ` ; comment`.
pub fn parse_lines(text: &str) -> Result<Vec<IniEvent>, IniError> {
    let mut events = Vec::new();
    // Continuations are only legal directly after an option (or another continuation).
    let mut in_option = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }

        // An indented line after an option extends its value, even when it
        // looks like a comment.
        let indented = raw.starts_with(char::is_whitespace);
        if indented && in_option {
            events.push(IniEvent::Continuation {
                line,
                text: trimmed.to_string(),
            });
            continue;
        }

        if trimmed.starts_with(COMMENT_PREFIXES) {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            // The header ends at the first `]`; anything after it is ignored.
            let name = rest
                .find(']')
                .map(|end| &rest[..end])
                .filter(|n| !n.is_empty())
                .ok_or_else(|| IniError::MalformedLine {
                    line,
                    text: trimmed.to_string(),
                })?;
            events.push(IniEvent::Section {
                line,
                name: name.to_string(),
            });
            in_option = false;
            continue;
        }

        let (key, value) = split_assignment(trimmed).ok_or_else(|| IniError::MalformedLine {
            line,
            text: trimmed.to_string(),
        })?;
        events.push(IniEvent::Option {
            line,
            key: key.to_string(),
            value: strip_inline_comment(value).to_string(),
        });
        in_option = true;
    }

    Ok(events)
}

/// Cut an option value at its first `;` when that `;` follows whitespace.
///
/// `a;b` keeps its semicolon; `1 ; note` becomes `1`. Continuation lines are
/// never cut.
fn strip_inline_comment(value: &str) -> &str {
    match value.find(INLINE_COMMENT) {
        Some(pos) if value[..pos].ends_with(char::is_whitespace) => value[..pos].trim_end(),
        _ => value,
    }
}

/// Split `key = value` at the first assignment character.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(ASSIGNMENT_CHARS)?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[pos + 1..].trim()))
}
