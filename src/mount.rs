//! Mount-interface glue: the operations a host VFS would dispatch into
//! (`fill_super`, `lookup`, `get_inode`, `create`, `mkdir`, `read`, `write`,
//! `iterate`), collected on one `Mount` type.

use spin::RwLock;

use crate::alloc;
use crate::block::BlockDevice;
use crate::constants::{BLOCK_SIZE, S_IFDIR, S_IFREG};
use crate::dir::{self, DirEntry};
use crate::error::{Error, Result};
use crate::inode_store::{self, InodeRecord};
use crate::superblock::Superblock;

/// A materialized inode, returned directly to the caller in place of the
/// dentry-attach step a live kernel VFS would perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inode {
    pub inode_no: u64,
    pub mode: u32,
    pub data_block_number: u64,
    pub size: u64,
}

impl Inode {
    pub fn is_dir(&self) -> bool {
        self.mode & S_IFDIR != 0
    }

    pub fn is_file(&self) -> bool {
        self.mode & S_IFREG != 0
    }

    fn from_record(rec: InodeRecord) -> Self {
        Self {
            inode_no: rec.inode_no,
            mode: rec.mode,
            data_block_number: rec.data_block_number,
            size: rec.size,
        }
    }

    fn to_record(self) -> InodeRecord {
        InodeRecord {
            inode_no: self.inode_no,
            mode: self.mode,
            data_block_number: self.data_block_number,
            size: self.size,
        }
    }
}

/// A mounted assoofs image, holding the device it's backed by and the
/// shared superblock state.
pub struct Mount<D: BlockDevice> {
    dev: D,
    sb: RwLock<Superblock>,
}

impl<D: BlockDevice> Mount<D> {
    pub const MAX_FILE_SIZE: u64 = Superblock::MAX_FILE_SIZE;

    /// `fill_super`: reads and validates the superblock, making the image
    /// ready for further operations.
    pub fn open(dev: D) -> Result<Self> {
        let sb = Superblock::read(&dev)?;
        let root = inode_store::find(&dev, sb.inodes_count, crate::constants::ROOT_INO)
            .map_err(|_| Error::MountFailed("root inode missing from inode store"))?;
        if root.mode & S_IFDIR == 0 {
            return Err(Error::MountFailed("root inode is not a directory"));
        }
        log::info!("mounted assoofs image, {} inodes in use", sb.inodes_count);
        Ok(Self {
            dev,
            sb: RwLock::new(sb),
        })
    }

    /// `get_inode`: materializes the inode record for `inode_no`.
    pub fn stat(&self, inode_no: u64) -> Result<Inode> {
        let inodes_count = self.sb.read().inodes_count;
        let rec = inode_store::find(&self.dev, inodes_count, inode_no)?;
        Ok(Inode::from_record(rec))
    }

    /// `lookup`: resolves `name` within directory `parent_ino`.
    pub fn lookup(&self, parent_ino: u64, name: &str) -> Result<Inode> {
        let parent = self.stat(parent_ino)?;
        if !parent.is_dir() {
            return Err(Error::NotADirectory);
        }
        let inode_no = dir::search(&self.dev, parent.data_block_number, parent.size, name)?;
        self.stat(inode_no)
    }

    /// `iterate`: lists every entry of directory `inode_no`. One-shot: a
    /// non-zero `cursor` (anything but a fresh enumeration) yields nothing.
    pub fn iterate(&self, inode_no: u64, cursor: u64) -> Result<Vec<DirEntry>> {
        let inode = self.stat(inode_no)?;
        if !inode.is_dir() {
            return Err(Error::NotADirectory);
        }
        dir::read_entries(&self.dev, inode.data_block_number, inode.size, cursor)
    }

    /// `create`: makes a new regular file named `name` inside `parent_ino`.
    pub fn create(&self, parent_ino: u64, name: &str) -> Result<Inode> {
        self.make_object(parent_ino, name, S_IFREG)
    }

    /// `mkdir`: makes a new directory named `name` inside `parent_ino`.
    pub fn mkdir(&self, parent_ino: u64, name: &str) -> Result<Inode> {
        self.make_object(parent_ino, name, S_IFDIR)
    }

    fn make_object(&self, parent_ino: u64, name: &str, mode: u32) -> Result<Inode> {
        let mut sb = self.sb.write();

        let parent_rec = inode_store::find(&self.dev, sb.inodes_count, parent_ino)?;
        if parent_rec.mode & S_IFDIR == 0 {
            return Err(Error::NotADirectory);
        }
        if sb.inodes_count as usize >= crate::constants::MAX_OBJECTS {
            return Err(Error::NoSpace);
        }

        let data_block_number = alloc::acquire_block(&mut sb, &self.dev)?;
        let new_ino = inode_store::next_inode_number(sb.inodes_count);
        let record = InodeRecord {
            inode_no: new_ino,
            mode,
            data_block_number,
            size: 0,
        };
        inode_store::append(&self.dev, sb.inodes_count, record)?;

        dir::append_entry(
            &self.dev,
            parent_rec.data_block_number,
            parent_rec.size,
            new_ino,
            name,
        )?;
        let mut updated_parent = parent_rec;
        updated_parent.size += 1;
        inode_store::update(&self.dev, sb.inodes_count + 1, updated_parent)?;

        sb.inodes_count += 1;
        sb.write(&self.dev)?;

        Ok(Inode::from_record(record))
    }

    /// Reads `min(file_size, buf.len())` bytes from `inode_no`, always from
    /// the start of its data block. `offset` is used only for the EOF
    /// check (`offset >= file_size` returns 0) and is not added to the
    /// in-block read position — matching the source's asymmetry with
    /// `write`, which does advance by offset.
    pub fn read(&self, inode_no: u64, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let inode = self.stat(inode_no)?;
        if offset >= inode.size {
            return Ok(0);
        }
        let block = self.dev.read_block(inode.data_block_number)?;
        let to_copy = (inode.size as usize).min(buf.len());
        buf[..to_copy].copy_from_slice(&block[..to_copy]);
        Ok(to_copy)
    }

    /// Writes `data` into `inode_no` at `offset`. `file_size` becomes
    /// `offset + data.len()`.
    pub fn write(&self, inode_no: u64, offset: u64, data: &[u8]) -> Result<usize> {
        if offset as usize + data.len() > BLOCK_SIZE {
            return Err(Error::NoSpace);
        }
        let inodes_count = self.sb.read().inodes_count;
        let mut rec = inode_store::find(&self.dev, inodes_count, inode_no)?;

        let mut block = self.dev.read_block(rec.data_block_number)?;
        let start = offset as usize;
        block[start..start + data.len()].copy_from_slice(data);
        self.dev.write_block(rec.data_block_number, &block)?;

        rec.size = offset + data.len() as u64;
        inode_store::update(&self.dev, inodes_count, rec)?;
        Ok(data.len())
    }
}
