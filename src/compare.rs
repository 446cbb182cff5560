//! Opening two hive files and diffing them.

use crate::diff::{diff, DiffResult};
use crate::error::{RegistryError, Result};
use crate::hive::Hive;
use crate::path_set::PathSet;
use crate::walker::walk;
use std::path::Path;
use std::thread;
use tracing::{info, instrument};

/// Opens a hive, tagging any failure with the file's path.
pub fn open_hive(path: &Path) -> Result<Hive> {
    Hive::open(path).map_err(|e| RegistryError::open(path, e))
}

/// Walks an open hive from its root key.
pub fn hive_paths(hive: &Hive) -> Result<PathSet> {
    walk(&hive.root_key()?)
}

/// Computes the keys and values of `file_a` that are missing from `file_b`.
///
/// Both files are opened before either is walked, so an unreadable input
/// fails the comparison before any traversal starts. The two walks share no
/// state and run on separate scoped threads; both hives are unmapped on
/// every return path.
///
/// # Errors
///
/// Returns [`RegistryError::Open`] if either file cannot be opened as a hive,
/// or the first structural error hit while walking.
#[instrument(skip_all, fields(a = %file_a.display(), b = %file_b.display()))]
pub fn compare_files(file_a: &Path, file_b: &Path) -> Result<DiffResult> {
    let hive_a = open_hive(file_a)?;
    let hive_b = open_hive(file_b)?;

    let (paths_a, paths_b) = thread::scope(|scope| {
        let worker_b = scope.spawn(|| hive_paths(&hive_b));
        let paths_a = hive_paths(&hive_a);
        let paths_b = worker_b
            .join()
            .map_err(|_| RegistryError::WorkerPanicked {
                path: file_b.to_path_buf(),
            });
        (paths_a, paths_b)
    });
    let (paths_a, paths_b) = (paths_a?, paths_b??);

    info!(count_a = paths_a.len(), count_b = paths_b.len(), "Walked both hives");
    Ok(diff(&paths_a, &paths_b))
}
