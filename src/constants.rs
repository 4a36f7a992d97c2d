//! On-disk layout constants.

/// Size of every block on an assoofs device, including the superblock and
/// inode store blocks.
pub const BLOCK_SIZE: usize = 4096;

/// Magic number stamped into the superblock, identifying a valid assoofs
/// image. Spells "ASSOOFS0" across its bytes.
pub const MAGIC: u64 = 0x4153_534f_4f46_5330;

/// Maximum number of inodes (and therefore files/directories) an image can
/// hold, including the root directory.
pub const MAX_OBJECTS: usize = 64;

/// Maximum length, in bytes, of a single path component. Sized so a
/// directory's single data block can hold `MAX_OBJECTS` entries (the same
/// bound the inode store and the free-block bitmap use).
pub const FILENAME_MAXLEN: usize = 56;

/// Inode number of the root directory. Never reused, never freed.
pub const ROOT_INO: u64 = 1;

/// First inode number available for user-created files and directories.
pub const START_INO: u64 = 10;

/// Number of reserved inode numbers subtracted in the next-inode formula
/// (accounts for the root inode already occupying a slot below `START_INO`).
pub const RESERVED_INODES: u64 = 1;

/// Block index of the superblock.
pub const SUPERBLOCK_BLOCK: u64 = 0;

/// Block index of the packed inode store.
pub const INODE_STORE_BLOCK: u64 = 1;

/// Block index of the root directory's data block.
pub const ROOT_DIR_BLOCK: u64 = 2;

/// First block index available for allocation to new files/directories.
pub const FIRST_DATA_BLOCK: u64 = 3;

/// Mode bitmask marking an inode as a directory.
pub const S_IFDIR: u32 = 0o040000;

/// Mode bitmask marking an inode as a regular file.
pub const S_IFREG: u32 = 0o100000;
