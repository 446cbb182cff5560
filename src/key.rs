//! Registry key node (nk) parsing.

use crate::cell::{raw_name, CellType, KeyNodeFlags};
use crate::error::{RegistryError, Result};
use crate::tree::RawName;
use crate::utils::{read_u16_le, read_u32_le};

/// Minimum size of a key node structure in bytes.
const KEY_NODE_MIN_SIZE: usize = 0x4C;

/// Offset of the key name in the key node structure.
const KEY_NAME_OFFSET: usize = 0x4C;

/// Key node (nk) structure.
///
/// Only the fields needed to enumerate a key's name, subkeys and values are
/// kept; security, class name and size hints are skipped.
#[derive(Debug, Clone)]
pub struct KeyNode {
    /// Flags for this key.
    pub flags: KeyNodeFlags,

    /// Number of subkeys.
    pub subkey_count: u32,

    /// Offset to subkey list.
    pub subkey_list_offset: u32,

    /// Number of values.
    pub value_count: u32,

    /// Offset to value list.
    pub value_list_offset: u32,

    /// Key name, undecoded.
    pub name: RawName,
}

impl KeyNode {
    /// Parses a key node from cell data.
    ///
    /// # Arguments
    ///
    /// * `data` - Cell data (excluding size field, starting with "nk" signature).
    /// * `offset` - Offset of this cell for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or truncated.
    pub fn parse(data: &[u8], offset: u32) -> Result<Self> {
        if data.len() < KEY_NODE_MIN_SIZE {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: KEY_NODE_MIN_SIZE,
                actual: data.len(),
            });
        }

        CellType::KeyNode.expect(data, offset)?;

        let flags = KeyNodeFlags::new(read_u16_le(data, 0x02)?);
        let name_length = read_u16_le(data, 0x48)? as usize;

        let name_end = KEY_NAME_OFFSET + name_length;
        let name_data = data
            .get(KEY_NAME_OFFSET..name_end)
            .ok_or(RegistryError::TruncatedData {
                offset,
                expected: name_end,
                actual: data.len(),
            })?;

        Ok(KeyNode {
            flags,
            subkey_count: read_u32_le(data, 0x14)?,
            subkey_list_offset: read_u32_le(data, 0x1C)?,
            value_count: read_u32_le(data, 0x24)?,
            value_list_offset: read_u32_le(data, 0x28)?,
            name: raw_name(name_data, flags.is_compressed()),
        })
    }

    /// Returns true if this key has subkeys.
    pub fn has_subkeys(&self) -> bool {
        self.subkey_count > 0
    }

    /// Returns true if this key has values.
    pub fn has_values(&self) -> bool {
        self.value_count > 0
    }

    /// Returns true if this is the root key.
    pub fn is_root(&self) -> bool {
        self.flags.is_root()
    }
}
