//! Writes a freshly-initialized assoofs image.
//!
//! Stands in for the external formatting utility: produces exactly the
//! bytes a mount expects to find (superblock with `inodes_count = 1`, a
//! root inode pointing at block 2, and an empty root directory).

use crate::block::BlockDevice;
use crate::constants::{ROOT_DIR_BLOCK, ROOT_INO, S_IFDIR};
use crate::error::Result;
use crate::inode_store::{self, InodeRecord};
use crate::superblock::Superblock;

/// Formats `dev` as a brand-new assoofs image.
pub fn format(dev: &impl BlockDevice) -> Result<()> {
    let sb = Superblock::fresh();
    sb.write(dev)?;

    let root = InodeRecord {
        inode_no: ROOT_INO,
        mode: S_IFDIR,
        data_block_number: ROOT_DIR_BLOCK,
        size: 0,
    };
    inode_store::append(dev, 0, root)?;

    // empty root directory block — zeroed is already "no entries"
    dev.write_block(ROOT_DIR_BLOCK, &[0u8; crate::constants::BLOCK_SIZE])?;

    log::info!("formatted new assoofs image, root inode {}", ROOT_INO);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::MemBlockDevice;

    #[test]
    fn format_produces_mountable_image() {
        let dev = MemBlockDevice::new(8);
        format(&dev).unwrap();
        let sb = Superblock::read(&dev).unwrap();
        assert_eq!(sb.inodes_count, 1);
        let root = inode_store::find(&dev, 1, ROOT_INO).unwrap();
        assert_eq!(root.data_block_number, ROOT_DIR_BLOCK);
        assert_eq!(root.size, 0);
    }
}
