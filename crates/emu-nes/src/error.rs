//! System-level failures.

use emu_core::BusError;
use mos_6502::CpuError;
use nes_cartridge::CartridgeError;
use thiserror::Error;

/// Anything that stops the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NesError {
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
    #[error(transparent)]
    Cpu(#[from] CpuError),
    #[error(transparent)]
    Bus(#[from] BusError),
}
