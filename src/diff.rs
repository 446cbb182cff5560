//! One-directional difference between two path sets.

use crate::canonical::CanonicalPath;
use crate::path_set::PathSet;
use tracing::debug;

/// The paths of one hive that are missing from another.
///
/// Built by [`diff`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    unique: PathSet,
    source_len: usize,
}

impl DiffResult {
    /// Paths present in the first set and absent from the second.
    pub fn unique(&self) -> &PathSet {
        &self.unique
    }

    /// Size of the first set, |A|.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Size of the difference, |A \ B|.
    pub fn len(&self) -> usize {
        self.unique.len()
    }

    /// Returns true if every path of the first set is in the second.
    pub fn is_empty(&self) -> bool {
        self.unique.is_empty()
    }

    /// The difference in lexicographic order.
    pub fn sorted(&self) -> Vec<&CanonicalPath> {
        self.unique.sorted()
    }
}

/// Returns `a \ b`: every path in `a` that is not in `b`.
///
/// Direction matters; `diff(b, a)` answers the opposite question.
///
/// # Examples
///
/// ```
/// use reg_diff::diff::diff;
/// use reg_diff::path_set::PathSet;
///
/// let a: PathSet = ["x", "y"].into_iter().collect();
/// let b: PathSet = ["y", "z"].into_iter().collect();
/// assert!(diff(&a, &b).unique().contains("x"));
/// assert!(diff(&b, &a).unique().contains("z"));
/// ```
pub fn diff(a: &PathSet, b: &PathSet) -> DiffResult {
    let unique = a.difference(b);
    debug!(count_a = a.len(), count_b = b.len(), unique = unique.len(), "Computed difference");
    DiffResult {
        unique,
        source_len: a.len(),
    }
}
