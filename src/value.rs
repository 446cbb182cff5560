//! Registry value (vk) name parsing.
//!
//! Value data is never read: a comparison only tracks whether a value with a
//! given name exists under a key.

use crate::cell::{raw_name, CellType, VALUE_COMP_NAME};
use crate::error::{RegistryError, Result};
use crate::tree::RawName;
use crate::utils::read_u16_le;

/// Minimum size of a value key structure in bytes.
const VALUE_KEY_MIN_SIZE: usize = 0x14;

/// Offset of the value name in the value key structure.
const VALUE_NAME_OFFSET: usize = 0x14;

/// Value key (vk) structure, reduced to its name.
#[derive(Debug, Clone)]
pub struct ValueKey {
    /// Value name; `None` for the unnamed default value.
    pub name: Option<RawName>,
}

impl ValueKey {
    /// Parses a value key from cell data.
    ///
    /// # Arguments
    ///
    /// * `data` - Cell data (excluding size field, starting with "vk" signature).
    /// * `offset` - Offset of this cell for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or truncated.
    pub fn parse(data: &[u8], offset: u32) -> Result<Self> {
        if data.len() < VALUE_KEY_MIN_SIZE {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: VALUE_KEY_MIN_SIZE,
                actual: data.len(),
            });
        }

        CellType::ValueKey.expect(data, offset)?;

        let name_length = read_u16_le(data, 0x02)? as usize;
        let flags = read_u16_le(data, 0x10)?;

        let name = if name_length > 0 {
            let name_end = VALUE_NAME_OFFSET + name_length;
            let name_data = data
                .get(VALUE_NAME_OFFSET..name_end)
                .ok_or(RegistryError::TruncatedData {
                    offset,
                    expected: name_end,
                    actual: data.len(),
                })?;
            Some(raw_name(name_data, flags & VALUE_COMP_NAME != 0))
        } else {
            None
        };

        Ok(ValueKey { name })
    }

    /// Returns true for the unnamed default value.
    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }
}
