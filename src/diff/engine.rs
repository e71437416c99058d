//! Diff engine over N option documents.

use confdiff_ini::{Classification, ConfigDocument, ExceptionPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value slot of a source that lacks the section or the option.
///
/// Display only: a present value of `-` still differs from a missing one.
pub const ABSENT: &str = "-";

/// Presence markers for a section.
const PRESENT_MARKER: &str = "+";
const ABSENT_MARKER: &str = "-";

/// One labeled input of a comparison.
#[derive(Debug, Clone)]
pub struct Source {
    /// Backend label used as the column header
    pub label: String,

    /// Parsed options file (empty when the backend did not emit it)
    pub document: ConfigDocument,
}

impl Source {
    pub fn new(label: impl Into<String>, document: ConfigDocument) -> Self {
        Self {
            label: label.into(),
            document,
        }
    }
}

/// Section presence across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPresenceRow {
    pub section: String,

    /// One flag per source, in source order
    pub present: Vec<bool>,
}

impl SectionPresenceRow {
    /// `+`/`-` marker per source.
    pub fn markers(&self) -> Vec<&'static str> {
        self.present
            .iter()
            .map(|p| if *p { PRESENT_MARKER } else { ABSENT_MARKER })
            .collect()
    }

    /// Whether some sources have the section and others do not.
    pub fn presence_differs(&self) -> bool {
        distinct_count(self.present.iter()) > 1
    }
}

/// A (section, option) whose values disagree across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub section: String,
    pub option: String,

    /// One value per source; [`ABSENT`] when missing
    pub values: Vec<String>,

    pub classification: Classification,
}

/// DiffRow tallies per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCounts {
    pub ignored: usize,
    pub default: usize,
    pub unequal: usize,
}

impl DiffCounts {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Ignore => self.ignored += 1,
            Classification::Default => self.default += 1,
            Classification::Unequal => self.unequal += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ignored + self.default + self.unequal
    }
}

/// Result of diffing one logical file across sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Source labels, in source order
    pub labels: Vec<String>,

    /// Reported sections, each followed in `rows` by its option rows
    pub sections: Vec<SectionPresenceRow>,

    pub rows: Vec<DiffRow>,

    pub counts: DiffCounts,
}

impl DiffReport {
    /// A file fails when at least one divergence is classified `unequal`.
    pub fn is_failed(&self) -> bool {
        self.counts.unequal > 0
    }

    /// Option rows belonging to `section`.
    pub fn rows_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a DiffRow> + 'a {
        self.rows.iter().filter(move |r| r.section == section)
    }
}

/// Number of distinct members of a sequence.
pub fn distinct_count<T: Ord>(values: impl IntoIterator<Item = T>) -> usize {
    values.into_iter().collect::<BTreeSet<T>>().len()
}

/// Diff N sources against each other.
///
/// A DiffRow is emitted when the per-source values of an option (a missing
/// entry counting as its own value) hold at least two distinct members, so a
/// single source never produces rows. A section is reported when its
/// presence differs across sources or when it holds at least one DiffRow.
pub fn diff(sources: &[Source], policy: &ExceptionPolicy) -> DiffReport {
    let mut report = DiffReport {
        labels: sources.iter().map(|s| s.label.clone()).collect(),
        ..DiffReport::default()
    };

    let all_sections: BTreeSet<&str> = sources.iter().flat_map(|s| s.document.sections()).collect();

    for section in all_sections {
        let presence = SectionPresenceRow {
            section: section.to_string(),
            present: sources.iter().map(|s| s.document.has_section(section)).collect(),
        };

        let all_options: BTreeSet<&str> = sources
            .iter()
            .filter_map(|s| s.document.options(section))
            .flat_map(|options| options.keys().map(String::as_str))
            .collect();

        let mut rows = Vec::new();
        for option in all_options {
            let found: Vec<Option<&str>> = sources
                .iter()
                .map(|s| s.document.get(section, option))
                .collect();
            if distinct_count(found.iter()) < 2 {
                continue;
            }
            let values: Vec<String> = found
                .iter()
                .map(|v| v.unwrap_or(ABSENT).to_string())
                .collect();
            let classification = policy.classify(section, option);
            report.counts.record(classification);
            rows.push(DiffRow {
                section: section.to_string(),
                option: option.to_string(),
                values,
                classification,
            });
        }

        if presence.presence_differs() || !rows.is_empty() {
            report.sections.push(presence);
            report.rows.extend(rows);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> ConfigDocument {
        ConfigDocument::parse(text).unwrap()
    }

    fn sources(texts: &[(&str, &str)]) -> Vec<Source> {
        texts.iter().map(|(label, text)| Source::new(*label, doc(text))).collect()
    }

    #[test]
    fn test_value_mismatch_emits_unequal_row() {
        let report = diff(
            &sources(&[("A", "[Section1]\nx=1\n"), ("B", "[Section1]\nx=2\n")]),
            &ExceptionPolicy::new(),
        );
        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!((row.section.as_str(), row.option.as_str()), ("Section1", "x"));
        assert_eq!(row.values, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(row.classification, Classification::Unequal);
        assert_eq!(report.counts.unequal, 1);
        assert!(report.is_failed());
        // The section is reported because it holds a row.
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].markers(), vec!["+", "+"]);
    }

    #[test]
    fn test_policy_ignore_clears_failure() {
        let policy = ExceptionPolicy::parse("[Section]\nx = ignore\n").unwrap();
        let report = diff(
            &sources(&[("A", "[Section1]\nx=1\n"), ("B", "[Section1]\nx=2\n")]),
            &policy,
        );
        assert_eq!(report.rows[0].classification, Classification::Ignore);
        assert_eq!(report.counts.ignored, 1);
        assert_eq!(report.counts.unequal, 0);
        assert!(!report.is_failed());
    }

    #[test]
    fn test_section_presence_only() {
        let report = diff(&sources(&[("A", "[S1]\n"), ("B", "")]), &ExceptionPolicy::new());
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].section, "S1");
        assert_eq!(report.sections[0].markers(), vec!["+", "-"]);
        assert!(report.rows.is_empty());
        assert!(!report.is_failed());
    }

    #[test]
    fn test_three_sources_one_diverging() {
        let report = diff(
            &sources(&[("A", "[S]\nv=1\n"), ("B", "[S]\nv=1\n"), ("C", "[S]\nv=2\n")]),
            &ExceptionPolicy::new(),
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].values, vec!["1", "1", "2"]);
        assert_eq!(report.rows[0].classification, Classification::Unequal);
    }

    #[test]
    fn test_missing_option_reported_with_sentinel() {
        let report = diff(
            &sources(&[("A", "[S]\nv=1\nw=3\n"), ("B", "[S]\nv=1\n")]),
            &ExceptionPolicy::new(),
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].option, "w");
        assert_eq!(report.rows[0].values, vec!["3", ABSENT]);
    }

    #[test]
    fn test_options_of_missing_section_are_absent() {
        let report = diff(
            &sources(&[("A", "[S]\nv=1\n"), ("B", "[T]\n")]),
            &ExceptionPolicy::new(),
        );
        // S: present/absent with one diverging option; T: present/absent, no options.
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].values, vec!["1", ABSENT]);
        assert_eq!(report.rows_in("S").count(), 1);
        assert_eq!(report.rows_in("T").count(), 0);
    }

    #[test]
    fn test_empty_value_differs_from_absent() {
        let report = diff(
            &sources(&[("A", "[S]\nv=\n"), ("B", "[S]\n")]),
            &ExceptionPolicy::new(),
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].values, vec!["", ABSENT]);
    }

    #[test]
    fn test_literal_dash_differs_from_absent() {
        let report = diff(
            &sources(&[("A", "[S]\nx = -\n"), ("B", "[S]\n")]),
            &ExceptionPolicy::new(),
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].values, vec!["-".to_string(), "-".to_string()]);
        assert_eq!(report.counts.unequal, 1);
    }

    #[test]
    fn test_identical_sources_produce_nothing() {
        let text = "[S]\na=1\nb=2\n[T]\nc=3\n";
        let report = diff(&sources(&[("A", text), ("B", text)]), &ExceptionPolicy::new());
        assert!(report.sections.is_empty());
        assert!(report.rows.is_empty());
        assert_eq!(report.counts.total(), 0);
    }

    #[test]
    fn test_single_source_never_emits() {
        let report = diff(&sources(&[("A", "[S]\na=1\n[T]\n")]), &ExceptionPolicy::new());
        assert!(report.sections.is_empty());
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_no_sources() {
        let report = diff(&[], &ExceptionPolicy::new());
        assert!(report.labels.is_empty());
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_option_order_does_not_matter() {
        let policy = ExceptionPolicy::new();
        let a = diff(
            &sources(&[("A", "[S]\nx=1\ny=2\nz=3\n"), ("B", "[S]\nx=9\ny=2\n")]),
            &policy,
        );
        let b = diff(
            &sources(&[("A", "[S]\nz=3\nx=1\ny=2\n"), ("B", "[S]\ny=2\nx=9\n")]),
            &policy,
        );
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_counts_per_classification() {
        let policy = ExceptionPolicy::parse("[Port_]\nStamp = ignore\nMtu = default\n").unwrap();
        let report = diff(
            &sources(&[
                ("A", "[Port_1]\nStamp=1\nMtu=1500\nName=a\n"),
                ("B", "[Port_1]\nStamp=2\nName=b\n"),
            ]),
            &policy,
        );
        assert_eq!(
            report.counts,
            DiffCounts {
                ignored: 1,
                default: 1,
                unequal: 1
            }
        );
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(distinct_count(["1", "1", "2"]), 2);
        assert_eq!(distinct_count(["1"]), 1);
        assert_eq!(distinct_count(Vec::<&str>::new()), 0);
    }
}
