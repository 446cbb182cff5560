//! Read-only registry hive access over a memory-mapped file.

use crate::error::{RegistryError, Result};
use crate::header::{BaseBlock, BASE_BLOCK_SIZE};
use crate::key::KeyNode;
use crate::subkey_list::SubkeyList;
use crate::tree::{HiveNode, HiveValue, RawName};
use crate::utils::{cell_offset_to_absolute, is_null_offset, read_i32_le, read_u32_le};
use crate::value::ValueKey;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// An open registry hive.
///
/// The file stays mapped for as long as the `Hive` lives and is unmapped
/// when it is dropped. Keys and values borrow from the hive.
pub struct Hive {
    /// Hive data - either memory-mapped or owned.
    data: HiveData,

    /// Parsed base block header.
    base_block: BaseBlock,
}

/// Represents hive data storage.
enum HiveData {
    /// Memory-mapped file data.
    Mapped(Mmap),
    /// Owned data, e.g. a hive image built in memory.
    Owned(Vec<u8>),
}

impl HiveData {
    fn as_slice(&self) -> &[u8] {
        match self {
            HiveData::Mapped(mmap) => mmap,
            HiveData::Owned(data) => data,
        }
    }
}

impl Hive {
    /// Opens a registry hive file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped, or if its
    /// base block is not a valid `regf` header.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reg_diff::Hive;
    ///
    /// let hive = Hive::open("SYSTEM").unwrap();
    /// let root = hive.root_key().unwrap();
    /// println!("{} subkeys", root.subkeys().unwrap().len());
    /// ```
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;

        // Validate file size BEFORE creating memory map
        let file_size = file.metadata()?.len() as usize;
        if file_size < BASE_BLOCK_SIZE {
            return Err(RegistryError::HiveTooSmall {
                size: file_size,
                minimum: BASE_BLOCK_SIZE,
            });
        }

        // SAFETY: the file is opened read-only, its size has been checked,
        // the map lives exactly as long as the Hive and every read through it
        // is bounds-checked by read_cell(). Another process truncating the
        // file while it is mapped is outside our control.
        let mmap = unsafe { Mmap::map(&file)? };
        debug!(size = mmap.len(), "Memory mapped hive file");

        let hive = Self::from_data(HiveData::Mapped(mmap))?;
        info!(
            header = %hive.base_block,
            last_written = ?hive.base_block.last_written_datetime(),
            "Opened registry hive"
        );
        if !hive.base_block.is_consistent() {
            warn!("Hive is dirty; pending transaction log changes are not applied");
        }
        Ok(hive)
    }

    /// Creates a hive from an in-memory image.
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        Self::from_data(HiveData::Owned(data))
    }

    fn from_data(data: HiveData) -> Result<Self> {
        let base_block = BaseBlock::parse(data.as_slice())?;
        Ok(Self { data, base_block })
    }

    /// Returns a reference to the base block header.
    pub fn base_block(&self) -> &BaseBlock {
        &self.base_block
    }

    /// Returns the root key of the hive.
    ///
    /// # Errors
    ///
    /// Returns an error if the root key cannot be parsed.
    pub fn root_key(&self) -> Result<RegistryKey<'_>> {
        self.get_key(self.base_block.root_cell_offset)
    }

    /// Gets a key node by its cell offset (relative to first hbin).
    pub fn get_key(&self, offset: u32) -> Result<RegistryKey<'_>> {
        let key_node = KeyNode::parse(self.read_cell(offset)?, offset)?;
        Ok(RegistryKey {
            hive: self,
            offset,
            key_node,
        })
    }

    /// Reads a cell at the given offset.
    ///
    /// Returns the cell data, excluding the 4-byte size field.
    fn read_cell(&self, offset: u32) -> Result<&[u8]> {
        let abs_offset = cell_offset_to_absolute(offset)? as usize;
        let data = self.data.as_slice();

        if abs_offset >= data.len() {
            return Err(RegistryError::invalid_offset(offset, data.len()));
        }

        let size = read_i32_le(data, abs_offset)?;
        let abs_size = size.unsigned_abs() as usize;
        if abs_size < 4 {
            return Err(RegistryError::invalid_cell_size(size, offset));
        }

        let data_end = abs_offset + abs_size;
        if data_end > data.len() {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: abs_size,
                actual: data.len() - abs_offset,
            });
        }

        Ok(&data[abs_offset + 4..data_end])
    }

    fn read_subkey_list(&self, offset: u32) -> Result<SubkeyList> {
        SubkeyList::parse(self.read_cell(offset)?, offset)
    }
}

/// A registry key with access to its hive.
pub struct RegistryKey<'a> {
    hive: &'a Hive,
    /// Cell offset of this key (relative to first hbin).
    pub offset: u32,
    key_node: KeyNode,
}

impl<'a> RegistryKey<'a> {
    /// Returns the parsed key node.
    pub fn key_node(&self) -> &KeyNode {
        &self.key_node
    }

    /// Returns the key's undecoded name.
    pub fn raw_name(&self) -> &RawName {
        &self.key_node.name
    }

    /// Returns the key's direct subkeys.
    pub fn subkeys(&self) -> Result<Vec<RegistryKey<'a>>> {
        if !self.key_node.has_subkeys() {
            return Ok(Vec::new());
        }

        // the declared count is untrusted; the list cells decide the length
        let mut offsets = Vec::new();
        self.collect_subkey_offsets(self.key_node.subkey_list_offset, &mut offsets)?;

        if offsets.len() != self.key_node.subkey_count as usize {
            debug!(
                key_offset = %format!("{:#x}", self.offset),
                declared = self.key_node.subkey_count,
                found = offsets.len(),
                "Subkey count differs from list length"
            );
        }

        offsets
            .into_iter()
            .map(|offset| self.hive.get_key(offset))
            .collect()
    }

    /// Collects key offsets from a subkey list, expanding one index root level.
    fn collect_subkey_offsets(&self, list_offset: u32, offsets: &mut Vec<u32>) -> Result<()> {
        if is_null_offset(list_offset) {
            return Ok(());
        }

        let list = self.hive.read_subkey_list(list_offset)?;
        if !list.is_index_root() {
            offsets.extend_from_slice(&list.offsets);
            return Ok(());
        }

        for sublist_offset in list.offsets {
            let sublist = self.hive.read_subkey_list(sublist_offset)?;
            if sublist.is_index_root() {
                return Err(RegistryError::InvalidFormat(format!(
                    "Nested index root at offset {:#x}",
                    sublist_offset
                )));
            }
            offsets.extend_from_slice(&sublist.offsets);
        }

        Ok(())
    }

    /// Returns the key's values.
    pub fn values(&self) -> Result<Vec<RegistryValue>> {
        let key_node = &self.key_node;
        if !key_node.has_values() || is_null_offset(key_node.value_list_offset) {
            return Ok(Vec::new());
        }

        // Value list is an array of offsets
        let list_data = self.hive.read_cell(key_node.value_list_offset)?;
        let value_count = key_node.value_count as usize;
        if list_data.len() < value_count * 4 {
            return Err(RegistryError::TruncatedData {
                offset: key_node.value_list_offset,
                expected: value_count * 4,
                actual: list_data.len(),
            });
        }

        (0..value_count)
            .map(|i| {
                let offset = read_u32_le(list_data, i * 4)?;
                let value_key = ValueKey::parse(self.hive.read_cell(offset)?, offset)?;
                Ok(RegistryValue { value_key })
            })
            .collect()
    }
}

impl<'a> HiveNode for RegistryKey<'a> {
    type Value = RegistryValue;

    fn name(&self) -> Result<RawName> {
        Ok(self.key_node.name.clone())
    }

    fn child_keys(&self) -> Result<Vec<Self>> {
        self.subkeys()
    }

    fn values(&self) -> Result<Vec<Self::Value>> {
        RegistryKey::values(self)
    }

    fn node_id(&self) -> Option<u64> {
        Some(u64::from(self.offset))
    }
}

/// A registry value, reduced to its name.
#[derive(Debug, Clone)]
pub struct RegistryValue {
    value_key: ValueKey,
}

impl RegistryValue {
    /// Returns the value's undecoded name, `None` for the default value.
    pub fn raw_name(&self) -> Option<&RawName> {
        self.value_key.name.as_ref()
    }
}

impl HiveValue for RegistryValue {
    fn name(&self) -> Option<RawName> {
        self.value_key.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{CHECKSUM_OFFSET, REGF_SIGNATURE};
    use crate::utils::calculate_checksum;

    /// Base block followed by one hbin holding `cells` at offset 0x20.
    fn image(root_offset: u32, cells: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; BASE_BLOCK_SIZE];
        data[0..4].copy_from_slice(REGF_SIGNATURE);
        data[0x14..0x18].copy_from_slice(&1u32.to_le_bytes());
        data[0x18..0x1C].copy_from_slice(&5u32.to_le_bytes());
        data[0x24..0x28].copy_from_slice(&root_offset.to_le_bytes());
        let checksum = calculate_checksum(&data);
        data[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 4].copy_from_slice(&checksum.to_le_bytes());

        let mut hbin = vec![0u8; 0x20];
        hbin[0..4].copy_from_slice(b"hbin");
        hbin.extend_from_slice(cells);
        data.extend_from_slice(&hbin);
        data
    }

    #[test]
    fn test_cell_offset_out_of_bounds() {
        let hive = Hive::from_vec(image(0x10_0000, &[])).unwrap();
        assert!(matches!(
            hive.root_key(),
            Err(RegistryError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_cell_size_too_small() {
        let cells = 2i32.to_le_bytes();
        let hive = Hive::from_vec(image(0x20, &cells)).unwrap();
        assert!(matches!(
            hive.root_key(),
            Err(RegistryError::InvalidCellSize { size: 2, .. })
        ));
    }

    #[test]
    fn test_cell_runs_past_end() {
        let cells = (-0x100i32).to_le_bytes();
        let hive = Hive::from_vec(image(0x20, &cells)).unwrap();
        assert!(matches!(
            hive.root_key(),
            Err(RegistryError::TruncatedData { expected: 0x100, .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = Hive::open("/nonexistent/reg-diff/SYSTEM");
        assert!(matches!(result, Err(RegistryError::Io(_))));
    }
}
