//! Loading dataset trees from files.
//!
//! Datasets live in YAML or JSON files whose structure mirrors the subject
//! tree: mappings for branches, sequences of cases at the functions. A
//! directory of files becomes one branch keyed by file stem, so a suite can
//! be split across one file per top-level module.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::HarnessError;
use crate::tree::DatasetNode;

fn is_dataset_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json"))
}

/// Recursively finds dataset files under `root`, sorted for deterministic
/// suite order.
pub fn discover_dataset_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_dataset_file(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Parses a dataset tree from YAML text.
pub fn from_yaml_str(text: &str) -> Result<DatasetNode, HarnessError> {
    serde_yaml::from_str(text).map_err(|e| HarnessError::Dataset {
        path: "<string>".to_string(),
        reason: e.to_string(),
    })
}

/// Parses a dataset tree from JSON text.
pub fn from_json_str(text: &str) -> Result<DatasetNode, HarnessError> {
    serde_json::from_str(text).map_err(|e| HarnessError::Dataset {
        path: "<string>".to_string(),
        reason: e.to_string(),
    })
}

/// Loads one dataset file, picking the parser by extension.
pub fn load_dataset(path: &Path) -> Result<DatasetNode, HarnessError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| HarnessError::Dataset {
        path: display.clone(),
        reason: e.to_string(),
    })?;
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        other => Err(format!("unsupported dataset extension: {:?}", other)),
    };
    parsed.map_err(|reason| HarnessError::Dataset {
        path: display,
        reason,
    })
}

/// Loads every dataset file under `root` into one branch keyed by file stem.
pub fn load_dataset_dir<P: AsRef<Path>>(root: P) -> Result<DatasetNode, HarnessError> {
    let mut branch = DatasetNode::branch();
    for path in discover_dataset_files(root) {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string();
        branch = branch.with(stem, load_dataset(&path)?);
    }
    Ok(branch)
}
