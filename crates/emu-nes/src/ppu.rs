//! Picture-unit register stub.
//!
//! Only the CPU-facing side exists: eight registers at $2000-$2007 and
//! the 256-byte sprite memory they front. No rendering takes place.

use emu_core::Memory;

/// Register offsets within the block.
pub const OAM_ADDR: usize = 3;
pub const OAM_DATA: usize = 4;

/// The eight picture-unit registers plus sprite memory (OAM).
#[derive(Debug, Clone)]
pub struct PpuRegisters {
    registers: [u8; 8],
    oam: [u8; 256],
    oam_addr: u8,
}

impl PpuRegisters {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registers: [0; 8],
            oam: [0; 256],
            oam_addr: 0,
        }
    }

    #[must_use]
    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }

    #[must_use]
    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for PpuRegisters {
    fn read(&mut self, offset: usize) -> u8 {
        self.peek(offset)
    }

    fn write(&mut self, offset: usize, value: u8) {
        match offset {
            OAM_ADDR => self.oam_addr = value,
            OAM_DATA => {
                self.oam[usize::from(self.oam_addr)] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            _ => {}
        }
        if let Some(reg) = self.registers.get_mut(offset) {
            *reg = value;
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        match offset {
            OAM_DATA => self.oam[usize::from(self.oam_addr)],
            _ => self.registers.get(offset).copied().unwrap_or(0),
        }
    }

    fn len(&self) -> usize {
        self.registers.len()
    }

    fn name(&self) -> &str {
        "ppu"
    }
}
