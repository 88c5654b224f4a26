//! iNES cartridge parser and mapper implementations.
//!
//! [`Cartridge::load`] parses the iNES file format (header, optional
//! trainer, PRG ROM, CHR ROM) and binds the bytes to a [`Mapper`]. Only
//! NROM (mapper 0) is built in; further boards plug in through the
//! [`Mapper`] trait without touching the bus or CPU.

mod cartridge;
mod error;
mod header;
mod mapper;
mod nrom;

pub use cartridge::Cartridge;
pub use error::CartridgeError;
pub use header::{Header, Mirroring};
pub use mapper::Mapper;
pub use nrom::Nrom;

/// Size of one PRG ROM bank.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// Size of one CHR ROM bank.
pub const CHR_BANK_SIZE: usize = 8 * 1024;
/// Size of the CPU-visible program window ($8000-$FFFF).
pub const PRG_WINDOW_SIZE: usize = 32 * 1024;
