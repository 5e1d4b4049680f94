use std::{
    fs,
    path::{Path, PathBuf},
};

use crumbs_history::Entry;

use crate::error::AppError;

pub fn read_directories(path: &Path, show_hidden: bool) -> Result<Vec<String>, AppError> {
    let mut directories = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        directories.push(name);
    }

    directories.sort_by_key(|name| name.to_lowercase());

    Ok(directories)
}

pub fn label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

/// Every ancestor of `path` starting at the root, `path` itself last.
pub fn ancestor_entries(path: &Path) -> Vec<Entry<PathBuf, String>> {
    let mut entries: Vec<_> = path
        .ancestors()
        .map(|ancestor| Entry::new(ancestor.to_path_buf(), Some(label(ancestor))))
        .collect();

    entries.reverse();
    entries
}

pub fn resolve_startup_path(path: Option<&Path>) -> Result<PathBuf, AppError> {
    let path = match path {
        Some(path) => fs::canonicalize(path)?,
        None => fs::canonicalize(std::env::current_dir()?)?,
    };

    if path.is_dir() {
        return Ok(path);
    }

    tracing::info!("startup path is not a directory: {:?}", path);
    match path.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(AppError::InvalidTargetPath),
    }
}
