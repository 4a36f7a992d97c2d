//! Block-addressed storage. Stands in for the host's buffer cache: callers
//! read and write whole `BLOCK_SIZE` blocks by index, and every write is
//! synchronous (there is no separate dirty/sync step to drive, since the
//! crate keeps no cache of its own on top of these implementations).

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::constants::BLOCK_SIZE;
use crate::error::{Error, Result};

/// A fixed-size block buffer.
pub type Block = [u8; BLOCK_SIZE];

/// Block-addressed backing storage for an assoofs image.
pub trait BlockDevice {
    /// Read block `no`, zero-filling blocks past the end of the device.
    fn read_block(&self, no: u64) -> Result<Block>;

    /// Write block `no`, extending the device if necessary.
    fn write_block(&self, no: u64, buf: &Block) -> Result<()>;
}

/// An in-memory device, useful for unit tests and for embedding assoofs
/// without backing it by a real file.
pub struct MemBlockDevice {
    blocks: Mutex<Vec<Block>>,
}

impl MemBlockDevice {
    pub fn new(block_count: usize) -> Self {
        Self {
            blocks: Mutex::new(vec![[0u8; BLOCK_SIZE]; block_count]),
        }
    }
}

impl BlockDevice for MemBlockDevice {
    fn read_block(&self, no: u64) -> Result<Block> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks.get(no as usize).copied().unwrap_or([0u8; BLOCK_SIZE]))
    }

    fn write_block(&self, no: u64, buf: &Block) -> Result<()> {
        let mut blocks = self.blocks.lock().unwrap();
        let idx = no as usize;
        if idx >= blocks.len() {
            blocks.resize(idx + 1, [0u8; BLOCK_SIZE]);
        }
        blocks[idx] = *buf;
        Ok(())
    }
}

/// A device backed by a real file on the host filesystem, for persistence
/// across mounts.
pub struct FileBlockDevice {
    file: Mutex<std::fs::File>,
}

impl FileBlockDevice {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl BlockDevice for FileBlockDevice {
    fn read_block(&self, no: u64) -> Result<Block> {
        let mut file = self.file.lock().unwrap();
        let offset = no * BLOCK_SIZE as u64;
        let len = file.seek(SeekFrom::End(0))?;
        let mut buf = [0u8; BLOCK_SIZE];
        if offset < len {
            file.seek(SeekFrom::Start(offset))?;
            let to_read = ((len - offset) as usize).min(BLOCK_SIZE);
            file.read_exact(&mut buf[..to_read]).map_err(Error::from)?;
        }
        Ok(buf)
    }

    fn write_block(&self, no: u64, buf: &Block) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        let offset = no * BLOCK_SIZE as u64;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(buf)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_device_round_trips() {
        let dev = MemBlockDevice::new(4);
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0xab;
        dev.write_block(2, &buf).unwrap();
        assert_eq!(dev.read_block(2).unwrap(), buf);
        assert_eq!(dev.read_block(3).unwrap(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn mem_device_grows_on_write() {
        let dev = MemBlockDevice::new(1);
        let buf = [7u8; BLOCK_SIZE];
        dev.write_block(5, &buf).unwrap();
        assert_eq!(dev.read_block(5).unwrap(), buf);
        assert_eq!(dev.read_block(0).unwrap(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn file_device_round_trips() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let dev = FileBlockDevice::open(tmp.path()).unwrap();
        let mut buf = [0u8; BLOCK_SIZE];
        buf[10] = 0x42;
        dev.write_block(1, &buf).unwrap();
        assert_eq!(dev.read_block(1).unwrap(), buf);
        assert_eq!(dev.read_block(0).unwrap(), [0u8; BLOCK_SIZE]);
    }
}
