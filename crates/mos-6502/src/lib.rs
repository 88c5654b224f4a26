//! Cycle-accurate MOS 6502 CPU emulator.
//!
//! Models the NMOS core used in the NES (2A03): every documented and
//! undocumented opcode, exact dummy-read and dummy-write patterns, and
//! RST/NMI/IRQ sequencing sampled at instruction boundaries. The 2A03 has
//! no decimal mode, so ADC/SBC are always binary.

mod alu;
mod cpu;
mod error;
pub mod flags;
pub mod opcodes;
mod registers;
mod trace;

pub use cpu::{Interrupt, Mos6502};
pub use error::CpuError;
pub use flags::Status;
pub use opcodes::{Access, Mnemonic, Mode, Opcode};
pub use registers::Registers;
pub use trace::{Step, StepHook};
