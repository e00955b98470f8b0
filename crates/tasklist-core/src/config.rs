use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILENAME: &str = ".tasklist.toml";

/// Optional project config. Its only setting is a default backing file,
/// used when the command line gives no `--file`. A relative path resolves
/// against the directory holding the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasklistConfig {
    pub file: Option<String>,
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

/// Walks from `start` up through its ancestors and returns the first
/// directory containing a config file.
pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        if config_path(candidate).is_file() {
            return Some(candidate.to_path_buf());
        }
    }
    None
}

/// Reads the config in `dir`. Unreadable or unparseable files count as no
/// config rather than an error.
pub fn load_config(dir: &Path) -> Option<TasklistConfig> {
    let path = config_path(dir);
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(&path).ok()?;
    toml::from_str(&text).ok()
}

/// Resolves the default backing file for an invocation started in `start`.
pub fn resolve_default_file(start: &Path) -> Option<PathBuf> {
    let root = find_config_root(start)?;
    let file = load_config(&root)?.file?;
    let trimmed = file.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = PathBuf::from(trimmed);
    if candidate.is_absolute() {
        Some(candidate)
    } else {
        Some(root.join(candidate))
    }
}
