//! OAM DMA: the $4014 sprite-memory copy.
//!
//! One halt cycle, one more alignment cycle when starting on an odd CPU
//! cycle, then 256 read/write pairs from `page << 8` into $2004. That is
//! 513 or 514 cycles, during which the CPU is off the bus.

use emu_core::{Bus, BusError};

/// CPU address the copy writes to (OAMDATA).
pub const OAM_DATA: u16 = 0x2004;
const TRANSFER_CYCLES: u16 = 512;

/// Sprite DMA engine state.
#[derive(Debug, Clone, Default)]
pub struct OamDma {
    page: u8,
    /// Halt and alignment cycles still to burn.
    sync: u8,
    /// Transfer cycles done: even ones read, odd ones write.
    step: u16,
    latch: u8,
    active: bool,
}

impl OamDma {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transfer from `page`. `odd_cycle` adds the alignment cycle.
    pub fn start(&mut self, page: u8, odd_cycle: bool) {
        self.page = page;
        self.sync = 1 + u8::from(odd_cycle);
        self.step = 0;
        self.active = true;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cycles left before the CPU gets the bus back.
    #[must_use]
    pub fn remaining(&self) -> u16 {
        if self.active {
            u16::from(self.sync) + TRANSFER_CYCLES - self.step
        } else {
            0
        }
    }

    /// Run one DMA cycle. Does nothing when idle.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), BusError> {
        if !self.active {
            return Ok(());
        }
        if self.sync > 0 {
            self.sync -= 1;
            return Ok(());
        }

        if self.step % 2 == 0 {
            let addr = (u16::from(self.page) << 8) | (self.step / 2);
            self.latch = bus.read(addr)?;
        } else {
            bus.write(OAM_DATA, self.latch)?;
        }

        self.step += 1;
        if self.step == TRANSFER_CYCLES {
            self.active = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use emu_core::SimpleBus;

    use super::*;

    fn run(dma: &mut OamDma, bus: &mut SimpleBus) -> u16 {
        let mut cycles = 0;
        while dma.is_active() {
            dma.tick(bus).expect("flat bus");
            cycles += 1;
        }
        cycles
    }

    #[test]
    fn even_start_takes_513_cycles() {
        let mut dma = OamDma::new();
        dma.start(0x02, false);
        assert_eq!(dma.remaining(), 513);
        assert_eq!(run(&mut dma, &mut SimpleBus::new()), 513);
    }

    #[test]
    fn odd_start_takes_514_cycles() {
        let mut dma = OamDma::new();
        dma.start(0x02, true);
        assert_eq!(run(&mut dma, &mut SimpleBus::new()), 514);
        assert_eq!(dma.remaining(), 0);
    }

    #[test]
    fn last_byte_of_page_lands_at_oam_data() {
        let mut bus = SimpleBus::new();
        bus.load(0x0300, &[0x11]);
        bus.load(0x03FF, &[0x99]);
        let mut dma = OamDma::new();
        dma.start(0x03, false);

        // Halt cycle, then read $0300 and write it
        dma.tick(&mut bus).expect("flat bus");
        dma.tick(&mut bus).expect("flat bus");
        dma.tick(&mut bus).expect("flat bus");
        assert_eq!(bus.peek(OAM_DATA), Some(0x11));

        run(&mut dma, &mut bus);
        assert_eq!(bus.peek(OAM_DATA), Some(0x99));
    }

    #[test]
    fn idle_tick_touches_nothing() {
        let mut bus = SimpleBus::new();
        let mut dma = OamDma::new();
        dma.tick(&mut bus).expect("flat bus");
        assert_eq!(bus.peek(OAM_DATA), Some(0));
    }
}
