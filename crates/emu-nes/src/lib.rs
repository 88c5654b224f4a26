//! Cycle-accurate NES CPU side.
//!
//! A [`Nes`] owns a MOS 6502 and the console memory map ([`NesBus`]):
//! 2K internal RAM mirrored to $1FFF, the eight picture-unit registers
//! mirrored to $3FFF, the APU/IO block with two controllers, expansion
//! and save RAM, and the cartridge from $8000. Time advances one CPU cycle
//! per tick; $4014 sprite DMA steals 513 or 514 of them.

mod bus;
mod config;
mod controller;
mod dma;
mod error;
mod io;
mod nes;
pub mod ppu;
pub mod trace;

pub use bus::{Device, NesBus, RAM_SIZE};
pub use config::NesConfig;
pub use controller::{Controller, button};
pub use dma::OamDma;
pub use error::NesError;
pub use io::{IoRegisters, Port};
pub use nes::Nes;
