//! Per-instruction instrumentation.
//!
//! The CPU reports each opcode dispatch to at most one [`StepHook`]. A
//! caller that needs several observers composes them into one hook.

use std::fmt;
use std::sync::mpsc::Sender;

use crate::opcodes::Opcode;

/// Register snapshot taken as an opcode is fetched, before it executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Address of the opcode byte.
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub s: u8,
    pub opcode: u8,
    /// Operand bytes; only the first `len - 1` are meaningful.
    pub operands: [u8; 2],
    /// Instruction length in bytes, opcode included.
    pub len: u8,
    /// Cycles elapsed since power-on when the fetch began.
    pub cycles: u64,
}

impl Step {
    /// The operand bytes that belong to this instruction.
    #[must_use]
    pub fn operand_bytes(&self) -> &[u8] {
        let count = usize::from(self.len.saturating_sub(1)).min(2);
        &self.operands[..count]
    }

    #[must_use]
    pub fn decoded(&self) -> Opcode {
        Opcode::decode(self.opcode)
    }
}

/// Golden-log style line:
/// `C000  4C F5 C5  JMP  ...  A:00 X:00 Y:00 P:24 SP:FD CYC:7`.
///
/// Undocumented opcodes carry a `*` before the mnemonic.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = format!("{:02X}", self.opcode);
        for b in self.operand_bytes() {
            bytes.push_str(&format!(" {b:02X}"));
        }
        let decoded = self.decoded();
        let marker = if decoded.official { ' ' } else { '*' };
        write!(
            f,
            "{:04X}  {bytes:<8} {marker}{:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, decoded.mnemonic, self.a, self.x, self.y, self.p, self.s, self.cycles
        )
    }
}

/// Receiver of per-instruction snapshots.
pub trait StepHook {
    fn on_step(&mut self, step: &Step);
}

impl<F: FnMut(&Step)> StepHook for F {
    fn on_step(&mut self, step: &Step) {
        self(step);
    }
}

/// Forward snapshots over a channel. A dropped receiver is ignored.
impl StepHook for Sender<Step> {
    fn on_step(&mut self, step: &Step) {
        let _ = self.send(*step);
    }
}
