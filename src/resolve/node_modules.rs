//! Node-style module folder lookup.
//!
//! Mirrors how Node resolves a bare module specifier from a directory: every
//! ancestor contributes its `node_modules` folder, nearest first, except
//! ancestors that are themselves `node_modules` folders. `NODE_PATH` entries
//! are searched last.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Folders that may contain installed modules, in lookup order.
pub fn module_lookup_paths(start: &Path, node_path: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = start
        .ancestors()
        .filter(|dir| dir.file_name() != Some(OsStr::new("node_modules")))
        .map(|dir| dir.join("node_modules"))
        .collect();

    paths.extend(node_path.iter().cloned());
    paths
}

/// Candidate locations of `<module>/<subpath>` when required from `start`.
pub fn module_file_candidates(
    start: &Path,
    node_path: &[PathBuf],
    module: &str,
    subpath: &Path,
) -> Vec<PathBuf> {
    module_lookup_paths(start, node_path)
        .into_iter()
        .map(|folder| folder.join(module).join(subpath))
        .collect()
}
