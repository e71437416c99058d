//! Batch run summary (run_summary.json)

use chrono::{DateTime, Utc};
use confdiff_table::{Alignment, Style, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

use super::failure::{exit_code_for, Status};
use super::project::ProjectResult;

/// Schema version for run_summary.json
pub const RUN_SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for run_summary.json
pub const RUN_SUMMARY_SCHEMA_ID: &str = "confdiff/run_summary@1";

/// Run summary over all projects of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// Run identifier
    pub run_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    /// Number of failed or errored projects, clamped to 255
    pub exit_code: i32,

    pub project_count: usize,

    pub projects_passed: usize,

    pub projects_failed: usize,

    pub projects_errored: usize,

    /// Files compared across all projects
    pub files_compared: usize,

    /// Files with `unequal` divergences across all projects
    pub files_failed: usize,

    /// Human-readable summary
    pub human_summary: String,

    pub projects: Vec<ProjectResult>,
}

impl RunSummary {
    /// Aggregate project results under a fresh run id
    pub fn from_projects(projects: Vec<ProjectResult>) -> Self {
        Self::with_run_id(Uuid::new_v4().to_string(), projects)
    }

    pub fn with_run_id(run_id: String, projects: Vec<ProjectResult>) -> Self {
        let mut projects_passed = 0;
        let mut projects_failed = 0;
        let mut projects_errored = 0;

        for project in &projects {
            match project.status() {
                Status::Passed => projects_passed += 1,
                Status::Failed => projects_failed += 1,
                Status::Errored => projects_errored += 1,
            }
        }

        let project_count = projects.len();
        let human_summary =
            Self::generate_human_summary(project_count, projects_failed, projects_errored);

        Self {
            schema_version: RUN_SUMMARY_SCHEMA_VERSION,
            schema_id: RUN_SUMMARY_SCHEMA_ID.to_string(),
            run_id,
            created_at: Utc::now(),
            exit_code: exit_code_for(projects_failed + projects_errored),
            project_count,
            projects_passed,
            projects_failed,
            projects_errored,
            files_compared: projects.iter().map(|p| p.files_compared).sum(),
            files_failed: projects.iter().map(|p| p.files_failed).sum(),
            human_summary,
            projects,
        }
    }

    fn generate_human_summary(count: usize, failed: usize, errored: usize) -> String {
        if count == 0 {
            return "No projects compared".to_string();
        }
        if failed == 0 && errored == 0 {
            return format!("All {} project(s) match", count);
        }
        if errored == 0 {
            format!("{} of {} project(s) differ", failed, count)
        } else {
            format!(
                "{} of {} project(s) differ, {} could not be compared",
                failed, count, errored
            )
        }
    }

    /// Whether any project failed or errored
    pub fn is_failed(&self) -> bool {
        self.projects_failed + self.projects_errored > 0
    }

    /// Lay the summary out as a table, one row per project.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new("Summary");
        table.add_header(vec!["project", "files", "failed", "status"]);

        for project in &self.projects {
            let style = if project.failed() { Style::Red } else { Style::Green };
            table.add_row(
                vec![
                    project.name.clone(),
                    project.files_compared.to_string(),
                    project.files_failed.to_string(),
                    project.status().to_string(),
                ],
                Alignment::Left,
                style,
            );
        }

        table.add_total("projects", self.project_count);
        table.add_total("failed", self.projects_failed + self.projects_errored);
        table
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }
}
