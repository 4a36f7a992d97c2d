//! Packed inode record array, living entirely in block 1.

use crate::block::BlockDevice;
use crate::codec::RawInode;
use crate::constants::{INODE_STORE_BLOCK, MAX_OBJECTS, RESERVED_INODES, START_INO};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InodeRecord {
    pub inode_no: u64,
    pub mode: u32,
    pub data_block_number: u64,
    /// `file_size` for regular files, `dir_children_count` for directories.
    pub size: u64,
}

impl InodeRecord {
    fn from_raw(raw: RawInode) -> Self {
        Self {
            inode_no: raw.inode_no,
            mode: raw.mode,
            data_block_number: raw.data_block_number,
            size: raw.size,
        }
    }

    fn to_raw(self) -> RawInode {
        RawInode::new(self.inode_no, self.mode, self.data_block_number, self.size)
    }
}

/// Computes the inode number the next created object should receive, given
/// how many inodes already exist (root included).
pub fn next_inode_number(inodes_count: u64) -> u64 {
    inodes_count + START_INO - RESERVED_INODES + 1
}

/// Reads every inode record currently stored in the inode store block.
/// Slots beyond `inodes_count` are not meaningful and are not returned.
pub fn read_all(dev: &impl BlockDevice, inodes_count: u64) -> Result<Vec<InodeRecord>> {
    let block = dev.read_block(INODE_STORE_BLOCK)?;
    let mut out = Vec::with_capacity(inodes_count as usize);
    for slot in 0..inodes_count as usize {
        let offset = slot * RawInode::ENCODED_LEN;
        if offset + RawInode::ENCODED_LEN > block.len() {
            break;
        }
        out.push(InodeRecord::from_raw(RawInode::decode(&block[offset..])));
    }
    Ok(out)
}

/// Finds a single inode record by inode number.
pub fn find(dev: &impl BlockDevice, inodes_count: u64, inode_no: u64) -> Result<InodeRecord> {
    read_all(dev, inodes_count)?
        .into_iter()
        .find(|rec| rec.inode_no == inode_no)
        .ok_or(Error::NotFound)
}

/// Appends a new inode record to the store. Caller is responsible for
/// bumping `Superblock::inodes_count` and persisting it.
pub fn append(dev: &impl BlockDevice, inodes_count: u64, record: InodeRecord) -> Result<()> {
    if inodes_count as usize >= MAX_OBJECTS {
        return Err(Error::NoSpace);
    }
    let mut block = dev.read_block(INODE_STORE_BLOCK)?;
    let offset = inodes_count as usize * RawInode::ENCODED_LEN;
    record.to_raw().encode(&mut block[offset..]);
    dev.write_block(INODE_STORE_BLOCK, &block)
}

/// Overwrites an existing inode record in place (used by `write` to update
/// `file_size`, and by `mkdir`/directory insertion to bump
/// `dir_children_count`).
pub fn update(dev: &impl BlockDevice, inodes_count: u64, record: InodeRecord) -> Result<()> {
    let mut block = dev.read_block(INODE_STORE_BLOCK)?;
    for slot in 0..inodes_count as usize {
        let offset = slot * RawInode::ENCODED_LEN;
        let existing = RawInode::decode(&block[offset..]);
        if existing.inode_no == record.inode_no {
            record.to_raw().encode(&mut block[offset..]);
            return dev.write_block(INODE_STORE_BLOCK, &block);
        }
    }
    Err(Error::NotFound)
}
