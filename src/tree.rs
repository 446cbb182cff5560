//! Read-only view of a hive as a tree of keys and named values.
//!
//! The walker only needs three things from a hive: a key's name, its child
//! keys and the names of its values. [`HiveNode`] and [`HiveValue`] capture
//! exactly that, so the on-disk reader ([`crate::hive`]) and the in-memory
//! [`MemoryKey`] tree are interchangeable.

use crate::error::Result;
use encoding_rs::UTF_16LE;
use std::borrow::Cow;
use std::fmt;

/// A key or value name as stored, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawName {
    /// Compressed on-disk name: one Latin-1 byte per character.
    Latin1(Vec<u8>),
    /// Uncompressed on-disk name: UTF-16LE code units, possibly malformed.
    Utf16Le(Vec<u8>),
    /// Already-decoded text.
    Text(String),
}

impl RawName {
    /// Decodes the name for display, replacing malformed UTF-16 with U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match self {
            RawName::Latin1(bytes) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            RawName::Utf16Le(bytes) => UTF_16LE.decode_without_bom_handling(bytes).0,
            RawName::Text(text) => Cow::Borrowed(text),
        }
    }

    /// Returns true if the name has no characters.
    pub fn is_empty(&self) -> bool {
        match self {
            RawName::Latin1(bytes) | RawName::Utf16Le(bytes) => bytes.is_empty(),
            RawName::Text(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for RawName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for RawName {
    fn from(name: &str) -> Self {
        RawName::Text(name.to_string())
    }
}

impl From<String> for RawName {
    fn from(name: String) -> Self {
        RawName::Text(name)
    }
}

/// A registry key as seen by the walker.
pub trait HiveNode: Sized {
    /// Value type attached to this key.
    type Value: HiveValue;

    /// Returns the key's raw name.
    fn name(&self) -> Result<RawName>;

    /// Returns the key's direct child keys, in storage order.
    fn child_keys(&self) -> Result<Vec<Self>>;

    /// Returns the key's values, in storage order.
    fn values(&self) -> Result<Vec<Self::Value>>;

    /// Stable identity of the node within its hive, if it has one.
    ///
    /// The walker refuses to visit the same identity twice, which stops a
    /// corrupt hive with a cycle of key references from looping forever.
    fn node_id(&self) -> Option<u64> {
        None
    }
}

/// A registry value as seen by the walker. Only its name matters.
pub trait HiveValue {
    /// Returns the raw name, or `None` for the unnamed default value.
    fn name(&self) -> Option<RawName>;
}

/// In-memory registry key.
///
/// # Examples
///
/// ```
/// use reg_diff::tree::MemoryKey;
///
/// let root = MemoryKey::new("ROOT").with_subkey(
///     MemoryKey::new("Software")
///         .with_value("Ver")
///         .with_subkey(MemoryKey::new("Sub")),
/// );
/// assert_eq!(root.subkeys[0].values.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryKey {
    /// Key name.
    pub name: RawName,
    /// Values, in insertion order.
    pub values: Vec<MemoryValue>,
    /// Child keys, in insertion order.
    pub subkeys: Vec<MemoryKey>,
}

/// In-memory registry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryValue {
    /// Value name; `None` for the default value.
    pub name: Option<RawName>,
}

impl MemoryKey {
    /// Creates a key with no values or subkeys.
    pub fn new(name: impl Into<RawName>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            subkeys: Vec::new(),
        }
    }

    /// Adds a named value.
    pub fn with_value(mut self, name: impl Into<RawName>) -> Self {
        self.values.push(MemoryValue {
            name: Some(name.into()),
        });
        self
    }

    /// Adds the unnamed default value.
    pub fn with_default_value(mut self) -> Self {
        self.values.push(MemoryValue { name: None });
        self
    }

    /// Adds a child key.
    pub fn with_subkey(mut self, subkey: MemoryKey) -> Self {
        self.subkeys.push(subkey);
        self
    }
}

impl<'a> HiveNode for &'a MemoryKey {
    type Value = &'a MemoryValue;

    fn name(&self) -> Result<RawName> {
        Ok(self.name.clone())
    }

    fn child_keys(&self) -> Result<Vec<Self>> {
        Ok(self.subkeys.iter().collect())
    }

    fn values(&self) -> Result<Vec<Self::Value>> {
        Ok(self.values.iter().collect())
    }
}

impl HiveValue for &MemoryValue {
    fn name(&self) -> Option<RawName> {
        self.name.clone()
    }
}
