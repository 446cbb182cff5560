//! The set of canonical paths collected from one hive.

use crate::canonical::CanonicalPath;
use std::collections::hash_set::{self, HashSet};

/// Unordered, deduplicated set of canonical paths.
///
/// Inserting a path that is already present is a no-op, which is how
/// duplicate sibling names (and names that collapse under ASCII reduction)
/// end up as a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: HashSet<CanonicalPath>,
}

impl PathSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path; returns false if it was already present.
    pub fn insert(&mut self, path: CanonicalPath) -> bool {
        self.paths.insert(path)
    }

    /// Returns true if `path` is in the set.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the set has no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over the paths in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, CanonicalPath> {
        self.paths.iter()
    }

    /// Returns the paths in lexicographic order.
    pub fn sorted(&self) -> Vec<&CanonicalPath> {
        let mut paths: Vec<_> = self.paths.iter().collect();
        paths.sort_unstable();
        paths
    }

    /// Returns every path in `self` that is not in `other`.
    pub fn difference(&self, other: &PathSet) -> PathSet {
        self.paths.difference(&other.paths).cloned().collect()
    }

    /// Returns true if every path in `self` is also in `other`.
    pub fn is_subset(&self, other: &PathSet) -> bool {
        self.paths.is_subset(&other.paths)
    }
}

impl<P: Into<CanonicalPath>> FromIterator<P> for PathSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<CanonicalPath>> Extend<P> for PathSet {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a CanonicalPath;
    type IntoIter = hash_set::Iter<'a, CanonicalPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for PathSet {
    type Item = CanonicalPath;
    type IntoIter = hash_set::IntoIter<CanonicalPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}
