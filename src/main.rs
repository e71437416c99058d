//! confdiff CLI
//!
//! Entry point for the `confdiff` command-line tool.

use clap::{Parser, Subcommand};
use confdiff::compare::{derive_labels, discover_projects, Comparator, OutputSet};
use confdiff::config::{EffectiveConfig, Settings, REPO_CONFIG_FILE};
use confdiff::summary::{RunSummary, EXIT_USAGE};
use confdiff::logging;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "confdiff")]
#[command(about = "Compare INI configuration emitted by several backends", version)]
struct Cli {
    /// Path to repo config file
    #[arg(long, short = 'c', global = true, default_value = REPO_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding exception policy files
    #[arg(long, global = true)]
    policy_dir: Option<PathBuf>,

    /// When to color the report (auto, always, never)
    #[arg(long, global = true)]
    color: Option<String>,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare one set of backend output directories
    Check {
        /// Output directories, one per backend
        #[arg(required = true, num_args = 1..)]
        dirs: Vec<PathBuf>,

        /// Column label per directory, in order (default: derived from paths)
        #[arg(long = "label", short = 'l')]
        labels: Vec<String>,
    },

    /// Compare every project present under all backend roots
    Batch {
        /// Backend root as LABEL=DIR; repeat per backend
        #[arg(long = "backend", short = 'b', required = true, value_parser = parse_backend)]
        backends: Vec<OutputSet>,

        /// Print the run summary as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also write the run summary JSON to this file
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },

    /// Print the effective configuration with its sources
    Config,
}

fn parse_backend(s: &str) -> Result<OutputSet, String> {
    let (label, root) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=DIR, got '{}'", s))?;
    if label.is_empty() || root.is_empty() {
        return Err(format!("expected LABEL=DIR, got '{}'", s));
    }
    Ok(OutputSet::new(label, root))
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    match cli.command {
        Commands::Check { dirs, labels } => {
            run_check(&config, dirs, labels);
        }
        Commands::Batch {
            backends,
            json,
            summary_out,
        } => {
            run_batch(&config, &backends, json, summary_out);
        }
        Commands::Config => {
            run_config(&config);
        }
    }
}

fn load_config(cli: &Cli) -> Result<EffectiveConfig, confdiff::ConfigError> {
    let overrides = serde_json::json!({
        "policy": {
            "dir": cli.policy_dir.as_ref().map(|p| p.to_string_lossy().to_string())
        },
        "output": {
            "color": cli.color
        }
    });
    EffectiveConfig::build(Some(&cli.config), Some(overrides))
}

fn settings_or_exit(config: &EffectiveConfig) -> Settings {
    match config.settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(EXIT_USAGE);
        }
    }
}

fn run_check(config: &EffectiveConfig, dirs: Vec<PathBuf>, labels: Vec<String>) {
    let labels = if labels.is_empty() {
        derive_labels(&dirs)
    } else if labels.len() == dirs.len() {
        labels
    } else {
        eprintln!(
            "Error: {} label(s) given for {} director(ies)",
            labels.len(),
            dirs.len()
        );
        process::exit(EXIT_USAGE);
    };

    let sets: Vec<OutputSet> = labels
        .into_iter()
        .zip(dirs)
        .map(|(label, root)| OutputSet::new(label, root))
        .collect();

    let comparator = Comparator::new(settings_or_exit(config));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match comparator.check(&sets, &mut out) {
        Ok(outcome) => {
            info!(
                files = outcome.files_compared(),
                failed = outcome.files_failed(),
                "check finished"
            );
            process::exit(if outcome.files_failed() > 0 { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_USAGE);
        }
    }
}

fn run_batch(
    config: &EffectiveConfig,
    backends: &[OutputSet],
    json: bool,
    summary_out: Option<PathBuf>,
) {
    let comparator = Comparator::new(settings_or_exit(config));

    let roots: Vec<PathBuf> = backends.iter().map(|b| b.root.clone()).collect();
    let projects = match discover_projects(&roots) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error discovering projects: {}", e);
            process::exit(EXIT_USAGE);
        }
    };
    if projects.is_empty() {
        warn!(roots = ?roots, "no common projects");
    }
    info!(projects = projects.len(), "discovered projects");

    let stdout = io::stdout();
    let mut results = Vec::with_capacity(projects.len());
    let mut sink = io::sink();
    for name in &projects {
        let mut lock = stdout.lock();
        let out: &mut dyn Write = if json { &mut sink } else { &mut lock };
        if !json {
            let _ = writeln!(out, "{}", name);
        }
        let result = comparator.check_project(name, backends, out);
        if let Some(error) = &result.error {
            eprintln!("{}: {}", name, error);
        }
        if !json {
            let _ = writeln!(out);
        }
        results.push(result);
    }

    let summary = RunSummary::from_projects(results);

    if let Some(path) = summary_out {
        if let Err(e) = summary.write_to_file(&path) {
            eprintln!("Error writing summary to {}: {}", path.display(), e);
        }
    }

    if json {
        match summary.to_json() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(EXIT_USAGE);
            }
        }
    } else {
        print!("{}", comparator.renderer().render(&summary.to_table()));
        println!("{}", summary.human_summary);
    }

    process::exit(summary.exit_code);
}

fn run_config(config: &EffectiveConfig) {
    match config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(EXIT_USAGE);
        }
    }
}
