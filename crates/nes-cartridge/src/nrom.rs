//! NROM (Mapper 0): no bank switching.

use std::sync::Arc;

use crate::Mapper;

/// NROM board.
///
/// - PRG: 16K mirrored across $8000-$FFFF, or 32K mapped straight
/// - CHR: 8K ROM, or 8K RAM when the image has no CHR banks
/// - Program writes are ignored
pub struct Nrom {
    prg_rom: Arc<[u8]>,
    chr_rom: Arc<[u8]>,
    chr_ram: Option<Box<[u8; 0x2000]>>,
}

impl Nrom {
    #[must_use]
    pub fn new(prg_rom: Arc<[u8]>, chr_rom: Arc<[u8]>) -> Self {
        let chr_ram = chr_rom.is_empty().then(|| Box::new([0; 0x2000]));
        Self {
            prg_rom,
            chr_rom,
            chr_ram,
        }
    }
}

impl Mapper for Nrom {
    fn program_read(&self, addr: u16) -> u8 {
        if self.prg_rom.is_empty() {
            return 0;
        }
        // A single 16K bank answers at both $8000 and $C000
        self.prg_rom[usize::from(addr) % self.prg_rom.len()]
    }

    fn program_write(&mut self, _addr: u16, _value: u8) {}

    fn character_read(&self, addr: u16) -> u8 {
        let offset = usize::from(addr) & 0x1FFF;
        match &self.chr_ram {
            Some(ram) => ram[offset],
            None => self.chr_rom.get(offset).copied().unwrap_or(0),
        }
    }

    fn character_write(&mut self, addr: u16, value: u8) {
        if let Some(ram) = self.chr_ram.as_mut() {
            ram[usize::from(addr) & 0x1FFF] = value;
        }
    }
}
