//! Load-time failures.

use thiserror::Error;

/// Why an image could not become a [`crate::Cartridge`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartridgeError {
    #[error("{name}: not an iNES image (bad magic)")]
    InvalidMagic { name: String },

    #[error("{name}: header declares zero PRG ROM banks")]
    NoProgramBanks { name: String },

    #[error("{name}: truncated image, expected {expected} bytes, got {actual}")]
    Truncated {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{name}: unsupported mapper {number}")]
    UnsupportedMapper { name: String, number: u8 },
}
