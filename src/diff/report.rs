//! Table layout of a diff report.

use confdiff_ini::Classification;
use confdiff_table::{Alignment, Style, Table};

use super::engine::DiffReport;

/// Header of the classification column.
pub const CLASS_COLUMN: &str = "class";

/// Option rows are indented under their section row.
pub const OPTION_INDENT: &str = "  ";

/// Continuation lines inside a value are shown as a literal `\n` so every
/// cell stays on one line.
fn cell_text(value: &str) -> String {
    value.replace('\n', "\\n")
}

fn classification_style(classification: Classification) -> Style {
    match classification {
        Classification::Ignore => Style::Dim,
        Classification::Default => Style::Yellow,
        Classification::Unequal => Style::Red,
    }
}

impl DiffReport {
    /// Lay the report out as a table.
    ///
    /// The header holds an empty corner cell, one column per source and the
    /// classification column. Section rows are bold; option rows follow
    /// their section, styled by classification.
    pub fn to_table(&self, caption: impl Into<String>) -> Table {
        let mut table = Table::new(caption);

        let mut header = vec![String::new()];
        header.extend(self.labels.iter().cloned());
        header.push(CLASS_COLUMN.to_string());
        table.add_header(header);

        for section in &self.sections {
            let mut cells = vec![section.section.clone()];
            cells.extend(section.markers().into_iter().map(str::to_string));
            table.add_row(cells, Alignment::Center, Style::Bold);

            for row in self.rows_in(&section.section) {
                let mut cells = vec![format!("{}{}", OPTION_INDENT, row.option)];
                cells.extend(row.values.iter().map(|v| cell_text(v)));
                cells.push(row.classification.to_string());
                table.add_row(cells, Alignment::Left, classification_style(row.classification));
            }
        }

        if !self.rows.is_empty() {
            table.add_total(Classification::Ignore.to_string(), self.counts.ignored);
            table.add_total(Classification::Default.to_string(), self.counts.default);
            table.add_total(Classification::Unequal.to_string(), self.counts.unequal);
        }

        table
    }
}
