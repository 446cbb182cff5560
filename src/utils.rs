//! Little-endian field readers and offset helpers shared by the hive reader.

use crate::error::{RegistryError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Offset where hive bins start (after base block)
pub const HBIN_START_OFFSET: u32 = 0x1000;

/// Cell offset value meaning "no list" in key nodes.
pub const INVALID_OFFSET: u32 = 0xFFFF_FFFF;

/// Returns `len` bytes at `offset`, or a truncation error.
fn field(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset.saturating_add(len))
        .ok_or_else(|| RegistryError::TruncatedData {
            offset: offset as u32,
            expected: len,
            actual: data.len().saturating_sub(offset),
        })
}

/// Reads a u16 from a byte slice at the given offset.
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    Ok(LittleEndian::read_u16(field(data, offset, 2)?))
}

/// Reads a u32 from a byte slice at the given offset.
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    Ok(LittleEndian::read_u32(field(data, offset, 4)?))
}

/// Reads an i32 from a byte slice at the given offset.
pub fn read_i32_le(data: &[u8], offset: usize) -> Result<i32> {
    Ok(LittleEndian::read_i32(field(data, offset, 4)?))
}

/// Reads a u64 (e.g. a FILETIME) from a byte slice at the given offset.
pub fn read_u64_le(data: &[u8], offset: usize) -> Result<u64> {
    Ok(LittleEndian::read_u64(field(data, offset, 8)?))
}

/// Calculates XOR checksum for the first 508 bytes of the base block.
///
/// Windows never stores 0 or 0xFFFFFFFF; those results are nudged to 1 and
/// 0xFFFFFFFE.
pub fn calculate_checksum(data: &[u8]) -> u32 {
    let checksum = data
        .chunks_exact(4)
        .take(0x1FC / 4)
        .fold(0u32, |acc, dword| acc ^ LittleEndian::read_u32(dword));

    match checksum {
        0 => 1,
        u32::MAX => u32::MAX - 1,
        other => other,
    }
}

/// Converts a relative cell offset to an absolute hive offset.
///
/// Cell offsets in the registry are relative to the first hbin (at 0x1000).
///
/// # Errors
///
/// Returns `RegistryError::InvalidOffset` if the offset would overflow.
#[inline]
pub fn cell_offset_to_absolute(cell_offset: u32) -> Result<u32> {
    cell_offset
        .checked_add(HBIN_START_OFFSET)
        .ok_or(RegistryError::InvalidOffset {
            offset: cell_offset,
            hive_size: 0,
        })
}

/// Returns true if a list offset points nowhere.
#[inline]
pub fn is_null_offset(offset: u32) -> bool {
    offset == 0 || offset == INVALID_OFFSET
}
