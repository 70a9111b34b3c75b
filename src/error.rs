//! Error types for the gridlunge crate

use thiserror::Error;

use crate::state::Move;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move '{mv}' for player {player}")]
    IllegalMove { mv: Move, player: u8 },

    #[error("cache file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encode/decode error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("not a proof cache file (bad magic)")]
    BadMagic,

    #[error("unsupported cache format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("cache payload checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("cache file truncated: {len} bytes")]
    Truncated { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
