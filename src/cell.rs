//! Cell signatures and name-encoding flags.
//!
//! Cells are the fundamental records within hive bins. Each cell starts with
//! a 2-byte signature that identifies its type; key and value cells carry a
//! flag saying whether their name is stored compressed (Latin-1) or as
//! UTF-16LE.

use crate::error::{RegistryError, Result};
use crate::tree::RawName;

/// Cell types the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Key node (nk) - represents a registry key.
    KeyNode,

    /// Value key (vk) - represents a registry value.
    ValueKey,

    /// Index leaf (li) - list of subkey offsets.
    IndexLeaf,

    /// Fast leaf (lf) - list of subkeys with name hints.
    FastLeaf,

    /// Hash leaf (lh) - list of subkeys with name hashes.
    HashLeaf,

    /// Index root (ri) - list of subkey list offsets.
    IndexRoot,
}

impl CellType {
    /// Returns the 2-byte signature for this cell type.
    pub fn signature(&self) -> &'static [u8; 2] {
        match self {
            CellType::KeyNode => b"nk",
            CellType::ValueKey => b"vk",
            CellType::IndexLeaf => b"li",
            CellType::FastLeaf => b"lf",
            CellType::HashLeaf => b"lh",
            CellType::IndexRoot => b"ri",
        }
    }

    /// Checks that `data` starts with this cell type's signature.
    pub fn expect(&self, data: &[u8], offset: u32) -> Result<()> {
        match data.get(0..2) {
            Some(sig) if sig == self.signature() => Ok(()),
            _ => Err(RegistryError::InvalidFormat(format!(
                "Expected '{}' signature at offset {:#x}",
                String::from_utf8_lossy(self.signature()),
                offset
            ))),
        }
    }
}

/// Flags for key nodes.
#[derive(Debug, Clone, Copy)]
pub struct KeyNodeFlags(pub u16);

impl KeyNodeFlags {
    /// Key is the root key.
    pub const ROOT_KEY: u16 = 0x0004;

    /// Key name is in compressed format (Latin-1).
    pub const COMP_NAME: u16 = 0x0020;

    /// Creates a new KeyNodeFlags from a u16 value.
    pub fn new(flags: u16) -> Self {
        Self(flags)
    }

    /// Returns true if the specified flag is set.
    pub fn has_flag(&self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Returns true if the key name is compressed.
    pub fn is_compressed(&self) -> bool {
        self.has_flag(Self::COMP_NAME)
    }

    /// Returns true if this is the root key.
    pub fn is_root(&self) -> bool {
        self.has_flag(Self::ROOT_KEY)
    }
}

/// Value key flag: name is in compressed format (Latin-1).
pub const VALUE_COMP_NAME: u16 = 0x0001;

/// Wraps name bytes in the encoding their cell's flags announce.
pub fn raw_name(bytes: &[u8], compressed: bool) -> RawName {
    if compressed {
        RawName::Latin1(bytes.to_vec())
    } else {
        RawName::Utf16Le(bytes.to_vec())
    }
}
