//! CPU failure conditions.

use emu_core::BusError;
use thiserror::Error;

/// Fatal condition for a CPU instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// A KIL/JAM opcode was fetched. The CPU stays halted.
    #[error("CPU halted by opcode ${opcode:02X} at ${pc:04X}")]
    Halted { pc: u16, opcode: u8 },
    /// The bus rejected an access.
    #[error(transparent)]
    Bus(#[from] BusError),
}
