//! Crate-wide error type.

use thiserror::Error as ThisError;

pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong while mounting, formatting, or operating on
/// an assoofs image.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("bad superblock: {0}")]
    BadSuperblock(&'static str),

    #[error("no such file or directory")]
    NotFound,

    #[error("no space left on device")]
    NoSpace,

    #[error("directory is full")]
    DirectoryFull,

    #[error("not a directory")]
    NotADirectory,

    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("mount failed: {0}")]
    MountFailed(&'static str),
}
