//! Subkey list parsing (lf, lh, li, ri).
//!
//! Leaf lists point at key nodes directly. An index root points at further
//! leaf lists and has to be expanded by the caller.

use crate::error::{RegistryError, Result};
use crate::utils::read_u32_le;

/// Subkey list types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubkeyListType {
    /// Index leaf (li) - simple list of offsets.
    IndexLeaf,

    /// Fast leaf (lf) - list with 4-byte name hints.
    FastLeaf,

    /// Hash leaf (lh) - list with name hash hints.
    HashLeaf,

    /// Index root (ri) - list of subkey list offsets.
    IndexRoot,
}

impl SubkeyListType {
    /// Parses a subkey list type from a 2-byte signature.
    pub fn from_signature(sig: &[u8; 2], offset: u32) -> Result<Self> {
        match sig {
            b"li" => Ok(SubkeyListType::IndexLeaf),
            b"lf" => Ok(SubkeyListType::FastLeaf),
            b"lh" => Ok(SubkeyListType::HashLeaf),
            b"ri" => Ok(SubkeyListType::IndexRoot),
            _ => Err(RegistryError::InvalidSubkeyList {
                list_type: *sig,
                offset,
            }),
        }
    }

    /// Size in bytes of one list element.
    fn entry_size(&self) -> usize {
        match self {
            SubkeyListType::FastLeaf | SubkeyListType::HashLeaf => 8,
            SubkeyListType::IndexLeaf | SubkeyListType::IndexRoot => 4,
        }
    }
}

/// Parsed subkey list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubkeyList {
    /// Kind of list.
    pub list_type: SubkeyListType,

    /// Key node offsets, or for an index root, sublist offsets.
    pub offsets: Vec<u32>,
}

impl SubkeyList {
    /// Parses a subkey list from cell data.
    ///
    /// Name hints in lf/lh entries are skipped; only the offsets are kept.
    ///
    /// # Arguments
    ///
    /// * `data` - Cell data (excluding size field).
    /// * `offset` - Offset of this cell for error reporting.
    pub fn parse(data: &[u8], offset: u32) -> Result<Self> {
        if data.len() < 4 {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: 4,
                actual: data.len(),
            });
        }

        let list_type = SubkeyListType::from_signature(&[data[0], data[1]], offset)?;
        let count = u16::from_le_bytes([data[2], data[3]]) as usize;

        let entry_size = list_type.entry_size();
        let expected_size = 4 + count * entry_size;
        if data.len() < expected_size {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: expected_size,
                actual: data.len(),
            });
        }

        let offsets = (0..count)
            .map(|i| read_u32_le(data, 4 + i * entry_size))
            .collect::<Result<Vec<_>>>()?;

        Ok(SubkeyList { list_type, offsets })
    }

    /// Returns the number of entries in this list.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if this list is empty.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns true if this is an index root (contains sublists).
    pub fn is_index_root(&self) -> bool {
        self.list_type == SubkeyListType::IndexRoot
    }
}
