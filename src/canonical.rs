//! Canonical paths for keys and values.
//!
//! A canonical path joins the ASCII-reduced names of every ancestor below
//! the root with `/`. Value entries get a `___value` suffix so a value never
//! collides with a same-named subkey, and an unnamed value is spelled
//! `NONETYPE`.
//!
//! The ASCII reduction is lossy on purpose: two names that differ only in
//! non-ASCII characters map to the same path and become a single path-set
//! entry. `ascii_encode` is kept as its own step so that collapse stays
//! visible and testable.
//!
//! Joining also collapses redundant separators, so a name with a leading
//! `/` lands on the same path as the name without it: a value `/s` under
//! `Run` and a value `s` under `Run` are both `Run/s___value`.

use crate::tree::RawName;
use std::borrow::Borrow;
use std::fmt;

/// Separator placed between path segments.
pub const SEPARATOR: char = '/';

/// Stand-in name for a value that has no name.
pub const NULL_VALUE_SENTINEL: &str = "NONETYPE";

/// Suffix appended to every value segment.
pub const VALUE_SUFFIX: &str = "___value";

/// What kind of hive entry a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A registry key.
    Key,
    /// A value under a key.
    Value,
}

/// An ASCII path identifying a key or value within one hive.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// The empty path the root's children are joined onto.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path with `segment` appended.
    ///
    /// Follows POSIX path-join rules: an empty path yields the segment, and
    /// no separator is added when the path already ends with one or the
    /// segment already starts with one. `.` and `..` are kept verbatim.
    /// A leading separator never resets the path to the root, which makes
    /// `"/s"` and `"s"` indistinguishable below the same parent.
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            return Self(segment.to_string());
        }

        let mut joined = String::with_capacity(self.0.len() + 1 + segment.len());
        joined.push_str(&self.0);
        if !self.0.ends_with(SEPARATOR) && !segment.starts_with(SEPARATOR) {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment);
        Self(joined)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CanonicalPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for CanonicalPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Reduces a raw name to ASCII by dropping every non-ASCII character.
///
/// Latin-1 bytes at or above 0x80 are dropped. UTF-16 names are decoded
/// first; malformed code units decode to U+FFFD and are dropped with the
/// rest.
///
/// # Examples
///
/// ```
/// use reg_diff::canonical::ascii_encode;
/// use reg_diff::tree::RawName;
///
/// assert_eq!(ascii_encode(&RawName::from("Café")), "Caf");
/// assert_eq!(ascii_encode(&RawName::Latin1(b"Caf\xe9".to_vec())), "Caf");
/// ```
pub fn ascii_encode(name: &RawName) -> String {
    match name {
        RawName::Latin1(bytes) => bytes
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| char::from(b))
            .collect(),
        _ => name.to_string_lossy().chars().filter(char::is_ascii).collect(),
    }
}

/// Canonical path of a key named `name` under `parent`.
pub fn key_path(parent: &CanonicalPath, name: &RawName) -> CanonicalPath {
    parent.join(&ascii_encode(name))
}

/// Canonical path of a value named `name` under the key at `parent`.
pub fn value_path(parent: &CanonicalPath, name: Option<&RawName>) -> CanonicalPath {
    let mut segment = match name {
        Some(name) => ascii_encode(name),
        None => NULL_VALUE_SENTINEL.to_string(),
    };
    segment.push_str(VALUE_SUFFIX);
    parent.join(&segment)
}

/// Canonical path of an entry of the given kind.
///
/// A key without a name contributes an empty segment.
pub fn canonicalize(parent: &CanonicalPath, name: Option<&RawName>, kind: EntryKind) -> CanonicalPath {
    match (kind, name) {
        (EntryKind::Key, Some(name)) => key_path(parent, name),
        (EntryKind::Key, None) => parent.join(""),
        (EntryKind::Value, name) => value_path(parent, name),
    }
}
