//! Table model.

use serde::Serialize;

use crate::style::Style;

/// Horizontal alignment of the cells of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub align: Alignment,
    pub style: Style,
}

impl Row {
    pub fn new(cells: Vec<String>, align: Alignment, style: Style) -> Self {
        Self { cells, align, style }
    }

    /// Pad with empty cells up to `columns`.
    pub fn extend_to(&mut self, columns: usize) {
        if self.cells.len() < columns {
            self.cells.resize(columns, String::new());
        }
    }
}

/// Separator line printed before the row at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Separator {
    pub index: usize,
    pub glyph: char,
}

/// Aggregate row rendered after the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Total {
    pub label: String,
    pub value: String,
    pub style: Style,
}

/// Ordered rows, separators, totals and a caption.
///
/// Rows may have different lengths; the column count is the longest row
/// and shorter rows are padded with empty cells before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    caption: String,
    rows: Vec<Row>,
    separators: Vec<Separator>,
    totals: Vec<Total>,
    column_widths: Vec<usize>,
}

impl Table {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }

    /// Append a row.
    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>, align: Alignment, style: Style) {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if self.column_widths.len() < cells.len() {
            self.column_widths.resize(cells.len(), 0);
        }
        for (width, cell) in self.column_widths.iter_mut().zip(&cells) {
            *width = (*width).max(text_width(cell));
        }
        self.rows.push(Row::new(cells, align, style));
    }

    /// Append a header: `=` separator, centered row, `=` separator.
    pub fn add_header<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.add_separator('=');
        self.add_row(cells, Alignment::Center, Style::Plain);
        self.add_separator('=');
    }

    /// Mark a separator line before the next row to be added.
    pub fn add_separator(&mut self, glyph: char) {
        self.separators.push(Separator {
            index: self.rows.len(),
            glyph,
        });
    }

    /// Append left-aligned, unstyled rows.
    pub fn extend<S: Into<String>>(&mut self, rows: Vec<Vec<S>>) {
        for row in rows {
            self.add_row(row, Alignment::Left, Style::Plain);
        }
    }

    /// Append a total row (right-aligned, bold).
    pub fn add_total(&mut self, label: impl Into<String>, value: impl ToString) {
        self.totals.push(Total {
            label: label.into(),
            value: value.to_string(),
            style: Style::Bold,
        });
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    pub fn totals(&self) -> &[Total] {
        &self.totals
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Tables with at most one row (typically a bare header) carry no data.
    pub fn is_empty(&self) -> bool {
        self.rows.len() <= 1
    }

    /// Number of columns: the length of the longest row.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Widest cell (in chars) of column `n` across all rows.
    pub fn column_width(&self, n: usize) -> usize {
        self.column_widths.get(n).copied().unwrap_or(0)
    }

    pub fn column_widths(&self) -> &[usize] {
        &self.column_widths
    }

    /// Rows padded to the full column count.
    pub fn normalized_rows(&self) -> Vec<Row> {
        let columns = self.column_count();
        self.rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.extend_to(columns);
                row
            })
            .collect()
    }
}

/// Display width of a cell, counted in chars.
pub(crate) fn text_width(text: &str) -> usize {
    text.chars().count()
}
