//! On-disk byte layouts and their encode/decode logic.
//!
//! Each `Raw*` type is `#[repr(C)]` + `bytemuck::Pod` so it can be read from
//! and written to a block's raw bytes with no parsing step beyond a cast.

use bytemuck::{Pod, Zeroable};

use crate::constants::{BLOCK_SIZE, FILENAME_MAXLEN};

/// On-disk superblock layout (lives in block 0's first bytes; the rest of
/// the block is zero-padded).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct RawSuperblock {
    pub magic: u64,
    pub block_size: u64,
    pub inodes_count: u64,
    pub free_blocks: u64,
}

impl RawSuperblock {
    pub fn encode(&self, block: &mut [u8; BLOCK_SIZE]) {
        block.fill(0);
        block[..core::mem::size_of::<Self>()].copy_from_slice(bytemuck::bytes_of(self));
    }

    pub fn decode(block: &[u8; BLOCK_SIZE]) -> Self {
        *bytemuck::from_bytes(&block[..core::mem::size_of::<Self>()])
    }
}

/// On-disk inode record. `size` is a tagged union: interpreted as
/// `file_size` when `mode` marks a regular file, `dir_children_count` when
/// `mode` marks a directory.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct RawInode {
    pub inode_no: u64,
    pub mode: u32,
    _reserved: u32,
    pub data_block_number: u64,
    pub size: u64,
}

impl RawInode {
    pub fn new(inode_no: u64, mode: u32, data_block_number: u64, size: u64) -> Self {
        Self {
            inode_no,
            mode,
            _reserved: 0,
            data_block_number,
            size,
        }
    }

    pub const ENCODED_LEN: usize = core::mem::size_of::<RawInode>();

    pub fn encode(&self, buf: &mut [u8]) {
        buf[..Self::ENCODED_LEN].copy_from_slice(bytemuck::bytes_of(self));
    }

    pub fn decode(buf: &[u8]) -> Self {
        *bytemuck::from_bytes(&buf[..Self::ENCODED_LEN])
    }
}

/// On-disk directory entry: an inode number plus a zero-padded filename.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct RawDirEntry {
    pub inode_no: u64,
    pub filename: [u8; FILENAME_MAXLEN],
}

impl RawDirEntry {
    pub const ENCODED_LEN: usize = core::mem::size_of::<RawDirEntry>();

    /// Names longer than `FILENAME_MAXLEN` are truncated, matching the
    /// directory engine's "truncated/padded to `FILENAME_MAXLEN`" lookup
    /// comparison rule.
    pub fn new(inode_no: u64, name: &str) -> Self {
        let bytes = name.as_bytes();
        let len = bytes.len().min(FILENAME_MAXLEN);
        let mut filename = [0u8; FILENAME_MAXLEN];
        filename[..len].copy_from_slice(&bytes[..len]);
        Self { inode_no, filename }
    }

    pub fn name(&self) -> &str {
        let end = self
            .filename
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.filename.len());
        core::str::from_utf8(&self.filename[..end]).unwrap_or("")
    }

    pub fn encode(&self, buf: &mut [u8]) {
        buf[..Self::ENCODED_LEN].copy_from_slice(bytemuck::bytes_of(self));
    }

    pub fn decode(buf: &[u8]) -> Self {
        *bytemuck::from_bytes(&buf[..Self::ENCODED_LEN])
    }
}
