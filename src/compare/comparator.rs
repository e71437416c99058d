//! Port-by-port, file-by-file comparison of backend output directories.

use confdiff_ini::{policy_file_name, ConfigDocument, ExceptionPolicy};
use confdiff_table::{Renderer, StyleSheet};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::scan::{common_files, common_ports};
use super::CompareError;
use crate::config::Settings;
use crate::diff::{diff, DiffCounts, Source};
use crate::summary::ProjectResult;

/// Output directory of one backend, with its column label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSet {
    pub label: String,
    pub root: PathBuf,
}

impl OutputSet {
    pub fn new(label: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            root: root.into(),
        }
    }
}

/// Result of comparing one options file across backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub port: String,
    pub file: String,
    pub counts: DiffCounts,
    pub failed: bool,
}

/// Result of comparing one set of output directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub files: Vec<FileOutcome>,
}

impl CheckOutcome {
    pub fn files_compared(&self) -> usize {
        self.files.len()
    }

    pub fn files_failed(&self) -> usize {
        self.files.iter().filter(|f| f.failed).count()
    }
}

/// Drives the diff engine over every common port and options file.
#[derive(Debug, Clone)]
pub struct Comparator {
    settings: Settings,
    renderer: Renderer,
}

impl Comparator {
    /// Build a comparator whose renderer follows the color and placeholder
    /// settings.
    pub fn new(settings: Settings) -> Self {
        let styles = if settings.color.enabled() {
            StyleSheet::ansi()
        } else {
            StyleSheet::plain()
        };
        let renderer = Renderer::new(styles).with_placeholder(settings.placeholder.clone());
        Self { settings, renderer }
    }

    /// Replace the renderer.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Compare one set of output directories, writing a table per file.
    ///
    /// Missing options files in a backend compare as empty documents and a
    /// missing policy file classifies everything `unequal`. No common ports
    /// or files is reported as a warning with no findings.
    pub fn check(&self, sets: &[OutputSet], out: &mut dyn Write) -> Result<CheckOutcome, CompareError> {
        let mut outcome = CheckOutcome::default();
        let roots: Vec<PathBuf> = sets.iter().map(|s| s.root.clone()).collect();

        let ports = common_ports(&roots, &self.settings.port_pattern)?;
        if ports.is_empty() {
            warn!(dirs = ?roots, "no common ports");
            return Ok(outcome);
        }

        for port in ports {
            let port_dirs: Vec<PathBuf> = roots.iter().map(|r| r.join(&port)).collect();
            let files = common_files(&port_dirs, &self.settings.file_pattern)?;
            if files.is_empty() {
                warn!(port = %port, "no common options files");
                continue;
            }

            info!(port = %port, files = files.len(), "comparing port");
            writeln!(out, "\nComparing port: {}", port)?;

            for file in files {
                let counts = self.check_file(sets, &port, &file, out)?;
                outcome.files.push(FileOutcome {
                    failed: counts.unequal > 0,
                    port: port.clone(),
                    file,
                    counts,
                });
            }
        }

        Ok(outcome)
    }

    fn check_file(
        &self,
        sets: &[OutputSet],
        port: &str,
        file: &str,
        out: &mut dyn Write,
    ) -> Result<DiffCounts, CompareError> {
        let policy_path = self.settings.policy_dir.join(policy_file_name(file));
        let policy = ExceptionPolicy::load(&policy_path).map_err(|source| CompareError::Ini {
            path: policy_path.clone(),
            source,
        })?;
        debug!(file = %file, policy = %policy_path.display(), rules = policy.len(), "loaded policy");

        let sources = sets
            .iter()
            .map(|set| {
                let path = set.root.join(port).join(file);
                ConfigDocument::load_or_empty(&path)
                    .map(|document| Source::new(set.label.clone(), document))
                    .map_err(|source| CompareError::Ini { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let report = diff(&sources, &policy);
        debug!(
            file = %file,
            ignored = report.counts.ignored,
            default = report.counts.default,
            unequal = report.counts.unequal,
            "diffed file"
        );

        let table = report.to_table(file);
        write!(out, "\n{}", self.renderer.render(&table))?;

        Ok(report.counts)
    }

    /// Compare one project found under every backend root.
    ///
    /// Errors are recorded on the result instead of being returned, so one
    /// broken project does not stop a batch.
    pub fn check_project(&self, name: &str, backends: &[OutputSet], out: &mut dyn Write) -> ProjectResult {
        let sets: Vec<OutputSet> = backends
            .iter()
            .map(|b| OutputSet::new(b.label.clone(), b.root.join(name)))
            .collect();

        info!(project = %name, "checking project");
        match self.check(&sets, out) {
            Ok(outcome) => ProjectResult::from_outcome(name, &outcome),
            Err(e) => {
                warn!(project = %name, error = %e, "project check failed");
                ProjectResult::errored(name, e.to_string())
            }
        }
    }
}
