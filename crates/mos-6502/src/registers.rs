//! 6502 CPU registers.

use crate::Status;

/// 6502 CPU register set.
///
/// The 6502 has minimal registers:
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - S: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: 8-bit processor status
///
/// The field widths are the masking rule: every 8-bit register wraps
/// modulo 256 and PC wraps modulo 65536.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location, stack at $0100-$01FF).
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Registers at power-on, before the reset sequence has run.
    ///
    /// S starts at $00; the reset sequence's three stack decrements leave
    /// it at $FD.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            pc: 0,
            p: Status::new(),
        }
    }

    /// Push a value onto the stack, return the address written.
    pub fn push(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Pop a value from the stack, return the address to read.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        self.stack_addr()
    }

    /// Get the current stack address without modifying S.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.s as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_wraps_within_page_one() {
        let mut regs = Registers::new();
        assert_eq!(regs.push(), 0x0100);
        assert_eq!(regs.s, 0xFF);
        assert_eq!(regs.pop(), 0x0100);
        assert_eq!(regs.s, 0x00);
    }
}
