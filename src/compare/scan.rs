//! Discovery of the ports and options files shared by every backend.

use regex_lite::Regex;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::CompareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

/// Names of the immediate children of `dir` of the given kind that match
/// `pattern`. Hidden entries are skipped. A missing directory lists as empty.
fn list_names(dir: &Path, pattern: &Regex, kind: EntryKind) -> Result<BTreeSet<String>, CompareError> {
    let mut names = BTreeSet::new();

    if !dir.is_dir() {
        warn!(dir = %dir.display(), "directory does not exist");
        return Ok(names);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let file_type = entry.file_type();
        let matches_kind = match kind {
            EntryKind::Dir => file_type.is_dir(),
            EntryKind::File => file_type.is_file(),
        };
        if !matches_kind {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 name");
            continue;
        };
        if name.starts_with('.') || !pattern.is_match(name) {
            continue;
        }
        names.insert(name.to_string());
    }

    Ok(names)
}

/// Intersection of all sets; empty when there are none.
fn intersect(sets: impl IntoIterator<Item = BTreeSet<String>>) -> BTreeSet<String> {
    let mut iter = sets.into_iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    iter.fold(first, |acc, set| acc.intersection(&set).cloned().collect())
}

/// Port directories present under every output directory, sorted.
pub fn common_ports(dirs: &[PathBuf], pattern: &Regex) -> Result<Vec<String>, CompareError> {
    let sets = dirs
        .iter()
        .map(|dir| list_names(dir, pattern, EntryKind::Dir))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(intersect(sets).into_iter().collect())
}

/// Options files present in every port directory, sorted.
pub fn common_files(port_dirs: &[PathBuf], pattern: &Regex) -> Result<Vec<String>, CompareError> {
    let sets = port_dirs
        .iter()
        .map(|dir| list_names(dir, pattern, EntryKind::File))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(intersect(sets).into_iter().collect())
}

/// Project subdirectories present under every backend root, sorted.
///
/// Hidden directories are skipped; every other name qualifies.
pub fn discover_projects(roots: &[PathBuf]) -> Result<Vec<String>, CompareError> {
    let any = Regex::new(".").map_err(|e| CompareError::Pattern(e.to_string()))?;
    let sets = roots
        .iter()
        .map(|root| list_names(root, &any, EntryKind::Dir))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(intersect(sets).into_iter().collect())
}

fn component_names(path: &Path) -> Vec<String> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect()
}

/// Column labels for a set of output directories.
///
/// Each label is the first path component after the longest common
/// component prefix, so `/out/api/obj` and `/out/tde/obj` give `api` and
/// `tde`. A single directory is labeled by its last component. Labels that
/// would be empty or repeated fall back to `#1`..`#N`.
pub fn derive_labels(dirs: &[PathBuf]) -> Vec<String> {
    let fallback = || -> Vec<String> { (1..=dirs.len()).map(|i| format!("#{}", i)).collect() };

    let components: Vec<Vec<String>> = dirs.iter().map(|d| component_names(d)).collect();

    let labels: Vec<String> = if components.len() == 1 {
        components[0].last().cloned().into_iter().collect()
    } else {
        let shortest = components.iter().map(Vec::len).min().unwrap_or(0);
        let prefix = (0..shortest)
            .take_while(|&i| components.iter().all(|c| c[i] == components[0][i]))
            .count();
        components
            .iter()
            .filter_map(|c| c.get(prefix).cloned())
            .collect()
    };

    let unique: BTreeSet<&String> = labels.iter().collect();
    if labels.len() != dirs.len() || unique.len() != labels.len() || labels.iter().any(String::is_empty) {
        return fallback();
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FILE_PATTERN, DEFAULT_PORT_PATTERN};
    use std::fs;
    use tempfile::TempDir;

    fn port_rx() -> Regex {
        Regex::new(DEFAULT_PORT_PATTERN).unwrap()
    }

    fn file_rx() -> Regex {
        Regex::new(DEFAULT_FILE_PATTERN).unwrap()
    }

    #[test]
    fn test_common_ports_intersection() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        for dir in ["Client_Port_1", "Server_Port_2", "Other"] {
            fs::create_dir_all(a.join(dir)).unwrap();
        }
        for dir in ["Client_Port_1", "Client_Port_3"] {
            fs::create_dir_all(b.join(dir)).unwrap();
        }

        let ports = common_ports(&[a, b], &port_rx()).unwrap();
        assert_eq!(ports, vec!["Client_Port_1"]);
    }

    #[test]
    fn test_empty_first_set_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(b.join("Client_Port_1")).unwrap();

        assert!(common_ports(&[a, b], &port_rx()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_dir_lists_empty() {
        let temp = TempDir::new().unwrap();
        let ports = common_ports(&[temp.path().join("absent")], &port_rx()).unwrap();
        assert!(ports.is_empty());
    }

    #[test]
    fn test_common_files_skip_hidden_and_foreign() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        for name in ["Port.ini", "Load.ini", ".hidden.ini", "notes.txt"] {
            fs::write(a.join(name), "").unwrap();
            fs::write(b.join(name), "").unwrap();
        }
        fs::write(a.join("OnlyA.ini"), "").unwrap();

        let files = common_files(&[a, b], &file_rx()).unwrap();
        assert_eq!(files, vec!["Load.ini", "Port.ini"]);
    }

    #[test]
    fn test_directories_are_not_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dir.ini")).unwrap();
        let files = common_files(&[temp.path().to_path_buf()], &file_rx()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_projects() {
        let temp = TempDir::new().unwrap();
        let api = temp.path().join("api");
        let tde = temp.path().join("tde");
        for name in ["HTTP GET", "HTTP POST", ".cache"] {
            fs::create_dir_all(api.join(name)).unwrap();
        }
        fs::create_dir_all(tde.join("HTTP GET")).unwrap();
        fs::create_dir_all(tde.join(".cache")).unwrap();

        assert_eq!(discover_projects(&[api, tde]).unwrap(), vec!["HTTP GET"]);
    }

    #[test]
    fn test_derive_labels_after_common_prefix() {
        let dirs = vec![
            PathBuf::from("/out/api/obj/Project"),
            PathBuf::from("/out/tde/obj/Project"),
        ];
        assert_eq!(derive_labels(&dirs), vec!["api", "tde"]);
    }

    #[test]
    fn test_derive_labels_single_dir() {
        assert_eq!(derive_labels(&[PathBuf::from("/out/api")]), vec!["api"]);
    }

    #[test]
    fn test_derive_labels_fallback() {
        let dirs = vec![PathBuf::from("/out/api"), PathBuf::from("/out/api")];
        assert_eq!(derive_labels(&dirs), vec!["#1", "#2"]);

        let nested = vec![PathBuf::from("/out"), PathBuf::from("/out/api")];
        assert_eq!(derive_labels(&nested), vec!["#1", "#2"]);
    }
}
