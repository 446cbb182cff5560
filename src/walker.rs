//! Depth-first traversal of a hive tree into a [`PathSet`].

use crate::canonical::{key_path, value_path, CanonicalPath};
use crate::error::Result;
use crate::path_set::PathSet;
use crate::tree::{HiveNode, HiveValue};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Collects the canonical path of every key and value below `root`.
///
/// The root itself is not recorded; traversal starts at its direct
/// children. Each key contributes its own path plus one path per value,
/// and its children are visited with the key's path as their parent.
///
/// The frontier is an explicit stack, so deep hives cost heap rather than
/// call stack. Nodes that report a [`HiveNode::node_id`] are visited at most
/// once.
///
/// # Errors
///
/// Any error reading a key, its values or its subkeys aborts the walk.
///
/// # Examples
///
/// ```
/// use reg_diff::tree::MemoryKey;
/// use reg_diff::walker::walk;
///
/// let root = MemoryKey::new("ROOT")
///     .with_subkey(MemoryKey::new("Software").with_value("Ver"));
/// let paths = walk(&&root).unwrap();
/// assert!(paths.contains("Software"));
/// assert!(paths.contains("Software/Ver___value"));
/// assert_eq!(paths.len(), 2);
/// ```
#[instrument(skip_all)]
pub fn walk<N: HiveNode>(root: &N) -> Result<PathSet> {
    let mut paths = PathSet::new();
    let mut visited = HashSet::new();
    if let Some(id) = root.node_id() {
        visited.insert(id);
    }

    let mut frontier = Vec::new();
    enqueue(root.child_keys()?, &CanonicalPath::root(), &mut visited, &mut frontier);
    let mut keys = 0usize;

    while let Some((key, parent)) = frontier.pop() {
        let path = key_path(&parent, &key.name()?);
        for value in key.values()? {
            paths.insert(value_path(&path, value.name().as_ref()));
        }
        enqueue(key.child_keys()?, &path, &mut visited, &mut frontier);
        paths.insert(path);
        keys += 1;
    }

    debug!(keys, paths = paths.len(), "Walk complete");
    Ok(paths)
}

/// Pushes `children` onto the frontier, dropping any node already seen.
fn enqueue<N: HiveNode>(
    children: Vec<N>,
    parent: &CanonicalPath,
    visited: &mut HashSet<u64>,
    frontier: &mut Vec<(N, CanonicalPath)>,
) {
    for child in children {
        if let Some(id) = child.node_id() {
            if !visited.insert(id) {
                warn!(node = %format!("{:#x}", id), parent = %parent, "Key referenced twice; skipping");
                continue;
            }
        }
        frontier.push((child, parent.clone()));
    }
}
