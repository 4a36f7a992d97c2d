//! Directory engine: fixed-size directory records packed into a directory's
//! single data block.

use crate::block::BlockDevice;
use crate::codec::RawDirEntry;
use crate::error::{Error, Result};

/// Maximum number of entries a single directory block can hold.
pub const MAX_ENTRIES_PER_BLOCK: usize = crate::constants::BLOCK_SIZE / RawDirEntry::ENCODED_LEN;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub inode_no: u64,
    pub name: String,
}

/// Reads the first `children_count` directory records out of `block_no`.
/// One-shot enumeration: a non-zero `cursor` means the caller already
/// iterated and yields an empty sequence instead of re-walking the block.
pub fn read_entries(
    dev: &impl BlockDevice,
    block_no: u64,
    children_count: u64,
    cursor: u64,
) -> Result<Vec<DirEntry>> {
    if cursor != 0 {
        return Ok(Vec::new());
    }
    let block = dev.read_block(block_no)?;
    let mut out = Vec::with_capacity(children_count as usize);
    for slot in 0..children_count as usize {
        let offset = slot * RawDirEntry::ENCODED_LEN;
        if offset + RawDirEntry::ENCODED_LEN > block.len() {
            break;
        }
        let raw = RawDirEntry::decode(&block[offset..]);
        out.push(DirEntry {
            inode_no: raw.inode_no,
            name: raw.name().to_string(),
        });
    }
    Ok(out)
}

/// Linear search for `name` among a directory's entries.
pub fn search(
    dev: &impl BlockDevice,
    block_no: u64,
    children_count: u64,
    name: &str,
) -> Result<u64> {
    read_entries(dev, block_no, children_count, 0)?
        .into_iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.inode_no)
        .ok_or(Error::NotFound)
}

/// Appends a new `(inode_no, name)` record to a directory's data block.
/// Fails with `DirectoryFull` once the block can hold no more entries.
pub fn append_entry(
    dev: &impl BlockDevice,
    block_no: u64,
    children_count: u64,
    inode_no: u64,
    name: &str,
) -> Result<()> {
    if children_count as usize >= MAX_ENTRIES_PER_BLOCK {
        return Err(Error::DirectoryFull);
    }
    let entry = RawDirEntry::new(inode_no, name);
    let mut block = dev.read_block(block_no)?;
    let offset = children_count as usize * RawDirEntry::ENCODED_LEN;
    entry.encode(&mut block[offset..]);
    dev.write_block(block_no, &block)
}
