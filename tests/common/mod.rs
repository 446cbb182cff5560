//! Builds minimal, valid hive images from in-memory trees.

#![allow(dead_code)]

use reg_diff::header::{BASE_BLOCK_SIZE, CHECKSUM_OFFSET, REGF_SIGNATURE};
use reg_diff::tree::{MemoryKey, RawName};
use reg_diff::utils::calculate_checksum;
use std::fs;
use std::path::{Path, PathBuf};

const HBIN_HEADER_SIZE: usize = 0x20;
const HBIN_ALIGN: usize = 0x1000;

/// Accumulates allocated cells inside a single growing hbin.
struct Bins {
    data: Vec<u8>,
}

impl Bins {
    fn new() -> Self {
        let mut data = vec![0u8; HBIN_HEADER_SIZE];
        data[0..4].copy_from_slice(b"hbin");
        Self { data }
    }

    /// Appends an allocated cell and returns its offset relative to the
    /// first hbin.
    fn alloc(&mut self, body: &[u8]) -> u32 {
        let offset = self.data.len() as u32;
        let size = (body.len() + 4 + 7) & !7;
        self.data.extend_from_slice(&(-(size as i32)).to_le_bytes());
        self.data.extend_from_slice(body);
        self.data.resize(offset as usize + size, 0);
        offset
    }

    fn finish(mut self) -> Vec<u8> {
        let len = self.data.len().div_ceil(HBIN_ALIGN) * HBIN_ALIGN;
        self.data.resize(len, 0);
        self.data[4..8].copy_from_slice(&0u32.to_le_bytes());
        self.data[8..12].copy_from_slice(&(len as u32).to_le_bytes());
        self.data
    }
}

/// Name bytes and whether they are stored compressed.
fn encode_name(name: &RawName) -> (Vec<u8>, bool) {
    match name {
        RawName::Latin1(bytes) => (bytes.clone(), true),
        RawName::Utf16Le(bytes) => (bytes.clone(), false),
        RawName::Text(text) if text.chars().all(|c| (c as u32) < 0x100) => {
            (text.chars().map(|c| c as u8).collect(), true)
        }
        RawName::Text(text) => (
            text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            false,
        ),
    }
}

fn key_cell(flags: u16, name: &[u8], subkeys: (u32, u32), values: (u32, u32)) -> Vec<u8> {
    let mut cell = vec![0u8; 0x4C];
    cell[0..2].copy_from_slice(b"nk");
    cell[0x02..0x04].copy_from_slice(&flags.to_le_bytes());
    cell[0x14..0x18].copy_from_slice(&subkeys.0.to_le_bytes());
    cell[0x1C..0x20].copy_from_slice(&subkeys.1.to_le_bytes());
    cell[0x20..0x24].copy_from_slice(&u32::MAX.to_le_bytes());
    cell[0x24..0x28].copy_from_slice(&values.0.to_le_bytes());
    cell[0x28..0x2C].copy_from_slice(&values.1.to_le_bytes());
    cell[0x2C..0x30].copy_from_slice(&u32::MAX.to_le_bytes());
    cell[0x30..0x34].copy_from_slice(&u32::MAX.to_le_bytes());
    cell[0x48..0x4A].copy_from_slice(&(name.len() as u16).to_le_bytes());
    cell.extend_from_slice(name);
    cell
}

fn value_cell(name: Option<&RawName>) -> Vec<u8> {
    let (name, compressed) = name.map(encode_name).unwrap_or((Vec::new(), true));
    let mut cell = vec![0u8; 0x14];
    cell[0..2].copy_from_slice(b"vk");
    cell[0x02..0x04].copy_from_slice(&(name.len() as u16).to_le_bytes());
    // REG_NONE, no data
    cell[0x08..0x0C].copy_from_slice(&u32::MAX.to_le_bytes());
    cell[0x10..0x12].copy_from_slice(&u16::from(compressed).to_le_bytes());
    cell.extend_from_slice(&name);
    cell
}

fn offset_list(offsets: &[u32]) -> Vec<u8> {
    offsets.iter().flat_map(|o| o.to_le_bytes()).collect()
}

fn leaf_cell(sig: &[u8; 2], offsets: &[u32]) -> Vec<u8> {
    let hints = sig != b"li";
    let mut cell = sig.to_vec();
    cell.extend_from_slice(&(offsets.len() as u16).to_le_bytes());
    for offset in offsets {
        cell.extend_from_slice(&offset.to_le_bytes());
        if hints {
            cell.extend_from_slice(&[0u8; 4]);
        }
    }
    cell
}

/// Writes the subkey list for `offsets`, rotating through the list formats
/// so that every kind is exercised. Lists of more than two entries are split
/// under an index root.
fn subkey_list(bins: &mut Bins, offsets: &[u32], depth: usize) -> u32 {
    if offsets.len() > 2 {
        let mid = offsets.len() / 2;
        let left = bins.alloc(&leaf_cell(b"lf", &offsets[..mid]));
        let right = bins.alloc(&leaf_cell(b"li", &offsets[mid..]));
        let mut root = b"ri".to_vec();
        root.extend_from_slice(&2u16.to_le_bytes());
        root.extend_from_slice(&offset_list(&[left, right]));
        return bins.alloc(&root);
    }
    let sig: &[u8; 2] = match depth % 3 {
        0 => b"lh",
        1 => b"lf",
        _ => b"li",
    };
    bins.alloc(&leaf_cell(sig, offsets))
}

fn write_key(bins: &mut Bins, key: &MemoryKey, flags: u16, depth: usize) -> u32 {
    let children: Vec<u32> = key
        .subkeys
        .iter()
        .map(|child| write_key(bins, child, 0, depth + 1))
        .collect();
    let subkeys = if children.is_empty() {
        (0, u32::MAX)
    } else {
        (children.len() as u32, subkey_list(bins, &children, depth))
    };

    let value_offsets: Vec<u32> = key
        .values
        .iter()
        .map(|value| bins.alloc(&value_cell(value.name.as_ref())))
        .collect();
    let values = if value_offsets.is_empty() {
        (0, u32::MAX)
    } else {
        (value_offsets.len() as u32, bins.alloc(&offset_list(&value_offsets)))
    };

    let (name, compressed) = encode_name(&key.name);
    let flags = flags | if compressed { 0x0020 } else { 0 };
    bins.alloc(&key_cell(flags, &name, subkeys, values))
}

/// Serializes `root` into a complete hive image.
pub fn build_hive(root: &MemoryKey) -> Vec<u8> {
    let mut bins = Bins::new();
    let root_offset = write_key(&mut bins, root, 0x000C, 0);
    let bins = bins.finish();

    let mut image = vec![0u8; BASE_BLOCK_SIZE];
    image[0..4].copy_from_slice(REGF_SIGNATURE);
    image[0x04..0x08].copy_from_slice(&1u32.to_le_bytes());
    image[0x08..0x0C].copy_from_slice(&1u32.to_le_bytes());
    image[0x0C..0x14].copy_from_slice(&132_000_000_000_000_000u64.to_le_bytes());
    image[0x14..0x18].copy_from_slice(&1u32.to_le_bytes());
    image[0x18..0x1C].copy_from_slice(&5u32.to_le_bytes());
    image[0x20..0x24].copy_from_slice(&1u32.to_le_bytes());
    image[0x24..0x28].copy_from_slice(&root_offset.to_le_bytes());
    image[0x28..0x2C].copy_from_slice(&(bins.len() as u32).to_le_bytes());
    image[0x2C..0x30].copy_from_slice(&1u32.to_le_bytes());
    let checksum = calculate_checksum(&image);
    image[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 4].copy_from_slice(&checksum.to_le_bytes());

    image.extend_from_slice(&bins);
    image
}

/// Writes the hive image of `root` to `dir/name` and returns the path.
pub fn write_hive(dir: &Path, name: &str, root: &MemoryKey) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, build_hive(root)).expect("write hive image");
    path
}

/// Hive A of the before/after scenario: `Software` with value `Ver` and
/// subkey `Sub`.
pub fn scenario_a() -> MemoryKey {
    MemoryKey::new("ROOT").with_subkey(
        MemoryKey::new("Software")
            .with_value("Ver")
            .with_subkey(MemoryKey::new("Sub")),
    )
}

/// Hive B of the before/after scenario: `Software` only.
pub fn scenario_b() -> MemoryKey {
    MemoryKey::new("ROOT").with_subkey(MemoryKey::new("Software"))
}
