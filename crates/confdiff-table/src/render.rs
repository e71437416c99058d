//! Fixed-width text rendering of a [`Table`].
//!
//! Layout of a body row with three columns:
//!
//! ```text
//!  section | value-a | value-b |
//! ```
//!
//! Every cell is surrounded by one space of margin and closed by `|`, so a
//! row is `sum(width + 3)` chars wide. Separators span exactly that width.

use crate::style::StyleSheet;
use crate::table::{text_width, Alignment, Row, Table, Total};

/// Printed instead of a grid when a table has no data rows.
pub const DEFAULT_PLACEHOLDER: &str = "nothing to output";

/// Spaces on each side of a cell.
const MARGIN: usize = 1;

/// Closing border of every cell.
const BORDER: char = '|';

/// Renders tables with an injected style lookup.
#[derive(Debug, Clone)]
pub struct Renderer {
    styles: StyleSheet,
    placeholder: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(StyleSheet::plain())
    }
}

impl Renderer {
    pub fn new(styles: StyleSheet) -> Self {
        Self {
            styles,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Override the text printed for tables without data rows.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Render a table to text. Every line, including the last, ends in `\n`.
    pub fn render(&self, table: &Table) -> String {
        let mut out = String::new();
        if !table.caption().is_empty() {
            push_line(&mut out, table.caption());
        }

        if table.is_empty() || table.column_count() == 0 {
            push_line(&mut out, &self.placeholder);
            return out;
        }

        let widths = effective_widths(table);
        let row_width: usize = widths.iter().map(|w| w + 2 * MARGIN + 1).sum();
        let rows = table.normalized_rows();
        let mut separators = table.separators().iter().peekable();

        for (index, row) in rows.iter().enumerate() {
            while let Some(sep) = separators.next_if(|s| s.index <= index) {
                push_line(&mut out, &separator_line(sep.glyph, row_width));
            }
            push_line(&mut out, &self.styles.paint(row.style, &row_line(row, &widths)));
        }
        // Separators added after the last row.
        for sep in separators {
            push_line(&mut out, &separator_line(sep.glyph, row_width));
        }

        for total in table.totals() {
            push_line(&mut out, &self.styles.paint(total.style, &total_line(total, &widths)));
        }

        out
    }
}

/// Column widths widened so total labels and values fit.
fn effective_widths(table: &Table) -> Vec<usize> {
    let mut widths = table.column_widths().to_vec();
    let columns = widths.len();

    for total in table.totals() {
        let label = text_width(&total.label);
        let value = text_width(&total.value);
        if columns == 1 {
            widths[0] = widths[0].max(label + 1 + value);
            continue;
        }
        let span = label_span(&widths);
        if label > span {
            widths[0] += label - span;
        }
        let last = columns - 1;
        widths[last] = widths[last].max(value);
    }

    widths
}

/// Inner width of the cell formed by merging all but the last column.
fn label_span(widths: &[usize]) -> usize {
    let merged = &widths[..widths.len() - 1];
    merged.iter().sum::<usize>() + (2 * MARGIN + 1) * (merged.len() - 1)
}

fn row_line(row: &Row, widths: &[usize]) -> String {
    let mut line = String::new();
    for (n, (cell, width)) in row.cells.iter().zip(widths).enumerate() {
        // The first column holds names and always reads left to right.
        let align = if n == 0 { Alignment::Left } else { row.align };
        push_cell(&mut line, cell, *width, align);
    }
    line
}

fn total_line(total: &Total, widths: &[usize]) -> String {
    let mut line = String::new();
    if widths.len() == 1 {
        let text = format!("{} {}", total.label, total.value);
        push_cell(&mut line, &text, widths[0], Alignment::Right);
    } else {
        push_cell(&mut line, &total.label, label_span(widths), Alignment::Right);
        push_cell(&mut line, &total.value, widths[widths.len() - 1], Alignment::Right);
    }
    line
}

fn push_cell(line: &mut String, text: &str, width: usize, align: Alignment) {
    let space = width.saturating_sub(text_width(text));
    let (left, right) = match align {
        Alignment::Left => (0, space),
        Alignment::Right => (space, 0),
        Alignment::Center => (space / 2, space - space / 2),
    };
    line.push_str(&" ".repeat(left + MARGIN));
    line.push_str(text);
    line.push_str(&" ".repeat(right + MARGIN));
    line.push(BORDER);
}

fn separator_line(glyph: char, width: usize) -> String {
    std::iter::repeat(glyph).take(width).collect()
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
