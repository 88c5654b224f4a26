//! Top-level NES system.
//!
//! Time is counted in CPU cycles. Each [`Nes::tick`] is one cycle, spent
//! either by the CPU or, while a $4014 transfer runs, by OAM DMA. DMA
//! cycles still advance the CPU's cycle counter: the CPU is held off the
//! bus, its clock keeps running.

use emu_core::{Tickable, Ticks};
use mos_6502::{Mos6502, StepHook};
use nes_cartridge::Cartridge;

use crate::bus::NesBus;
use crate::config::NesConfig;
use crate::controller::Controller;
use crate::dma::OamDma;
use crate::error::NesError;
use crate::io::Port;

/// NES system.
pub struct Nes {
    cpu: Mos6502,
    bus: NesBus,
    dma: OamDma,
}

impl Nes {
    /// Create a new NES from the given configuration.
    ///
    /// With an entry point set, the reset sequence runs here and PC is then
    /// moved; otherwise reset runs on the first ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the ROM data is invalid.
    pub fn new(config: &NesConfig) -> Result<Self, NesError> {
        let cartridge = Cartridge::load(&config.rom_data, &config.rom_name)?;
        let mut nes = Self::from_cartridge(cartridge);

        if let Some(pc) = config.entry_point {
            nes.cpu.step(&mut nes.bus)?;
            nes.cpu.set_program_counter(pc);
            log::debug!("{}: entry point forced to ${pc:04X}", config.rom_name);
        }
        Ok(nes)
    }

    /// Power on around an already loaded cartridge.
    #[must_use]
    pub fn from_cartridge(cartridge: Cartridge) -> Self {
        Self {
            cpu: Mos6502::new(),
            bus: NesBus::new(cartridge),
            dma: OamDma::new(),
        }
    }

    /// Advance one CPU cycle.
    pub fn tick(&mut self) -> Result<(), NesError> {
        self.poll_dma();
        if self.dma.is_active() {
            self.tick_dma()
        } else {
            self.cpu.tick(&mut self.bus)?;
            Ok(())
        }
    }

    /// Run until the next instruction or interrupt sequence completes,
    /// draining any DMA that is due first.
    pub fn step(&mut self) -> Result<(), NesError> {
        self.poll_dma();
        while self.dma.is_active() {
            self.tick_dma()?;
        }
        self.cpu.step(&mut self.bus)?;
        Ok(())
    }

    /// Spend one cycle on DMA. Does nothing when no transfer is running.
    pub fn tick_dma(&mut self) -> Result<(), NesError> {
        if !self.dma.is_active() {
            return Ok(());
        }
        self.dma.tick(&mut self.bus)?;
        self.cpu.stall();
        Ok(())
    }

    /// True while DMA owns the bus and the CPU must not run.
    #[must_use]
    pub fn dma_active(&self) -> bool {
        self.dma.is_active()
    }

    /// Start a transfer requested through $4014. The request is honoured
    /// once the writing instruction has finished.
    fn poll_dma(&mut self) {
        if self.dma.is_active() || !self.cpu.is_instruction_complete() {
            return;
        }
        if let Some(page) = self.bus.take_dma_request() {
            self.dma.start(page, self.cpu.cycles().is_odd());
            log::trace!(
                "OAM DMA from ${page:02X}00 at cycle {}, {} cycles",
                self.cpu.cycles(),
                self.dma.remaining()
            );
        }
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut NesBus {
        &mut self.bus
    }

    #[must_use]
    pub fn cartridge(&self) -> &Cartridge {
        self.bus.cartridge()
    }

    /// CPU cycles since power-on, DMA included.
    #[must_use]
    pub fn cycles(&self) -> Ticks {
        self.cpu.cycles()
    }

    /// Set the full button state of one controller.
    pub fn set_buttons(&mut self, port: Port, mask: u8) {
        self.bus.controller_mut(port).set_buttons(mask);
    }

    #[must_use]
    pub fn controller(&self, port: Port) -> &Controller {
        self.bus.controller(port)
    }

    pub fn request_nmi(&mut self) {
        self.cpu.request_nmi();
    }

    /// Returns false when the request was masked or another was pending.
    pub fn request_irq(&mut self) -> bool {
        self.cpu.request_irq()
    }

    pub fn request_reset(&mut self) {
        self.cpu.request_reset();
    }

    /// Install the per-instruction hook on the CPU.
    pub fn set_step_hook(&mut self, hook: impl StepHook + 'static) {
        self.cpu.set_step_hook(hook);
    }
}

impl Tickable for Nes {
    type Error = NesError;

    fn tick(&mut self) -> Result<(), NesError> {
        Nes::tick(self)
    }
}

#[cfg(test)]
mod tests {
    use emu_core::Bus;
    use mos_6502::CpuError;

    use super::*;

    /// 16K NROM image: `code` at $8000, reset vector to $8000.
    fn make_nes(code: &[u8]) -> Nes {
        let mut rom = b"NES\x1a\x01\x01\x00\x00".to_vec();
        rom.resize(16, 0);
        let mut prg = vec![0xEA; 0x4000];
        prg[..code.len()].copy_from_slice(code);
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0x80;
        rom.extend(prg);
        rom.extend(vec![0; 0x2000]);
        Nes::new(&NesConfig::new(rom, "unit.nes")).expect("valid image")
    }

    #[test]
    fn reset_runs_on_first_step() {
        let mut nes = make_nes(&[]);
        nes.step().expect("reset");
        assert_eq!(nes.cpu().regs.pc, 0x8000);
        assert_eq!(nes.cpu().regs.s, 0xFD);
        assert_eq!(nes.cycles(), Ticks::new(7));
    }

    #[test]
    fn tick_advances_one_cycle() {
        let mut nes = make_nes(&[]);
        nes.tick().expect("tick");
        assert_eq!(nes.cycles(), Ticks::new(1));
        nes.tick_n(Ticks::new(6)).expect("ticks");
        assert!(nes.cpu().is_instruction_complete());
        assert_eq!(nes.cpu().regs.pc, 0x8000);
    }

    #[test]
    fn entry_point_skips_vector_after_reset() {
        let mut rom = b"NES\x1a\x01\x00\x00\x00".to_vec();
        rom.resize(16 + 0x4000, 0xEA);
        let config = NesConfig::new(rom, "entry.nes").with_entry_point(0xC000);
        let nes = Nes::new(&config).expect("valid image");
        assert_eq!(nes.cpu().regs.pc, 0xC000);
        assert_eq!(nes.cpu().regs.p.bits(), 0x24);
        assert_eq!(nes.cycles(), Ticks::new(7));
    }

    #[test]
    fn bad_image_is_reported() {
        let config = NesConfig::new(b"NOPE".to_vec(), "bad.nes");
        assert!(matches!(Nes::new(&config), Err(NesError::Cartridge(_))));
    }

    #[test]
    fn dma_holds_cpu_off_the_bus() {
        // LDA #$02 / STA $4014
        let mut nes = make_nes(&[0xA9, 0x02, 0x8D, 0x14, 0x40]);
        for _ in 0..3 {
            nes.step().expect("step");
        }
        assert!(!nes.dma_active());
        let pc = nes.cpu().regs.pc;

        nes.tick().expect("tick");
        assert!(nes.dma_active());
        assert_eq!(nes.cpu().regs.pc, pc);
    }

    #[test]
    fn kil_halts_with_context() {
        let mut nes = make_nes(&[0x02]);
        nes.step().expect("reset");
        let err = nes.step().expect_err("KIL halts");
        assert_eq!(
            err,
            NesError::Cpu(CpuError::Halted {
                pc: 0x8000,
                opcode: 0x02
            })
        );
        assert_eq!(nes.step().expect_err("stays halted"), err);
    }

    #[test]
    fn buttons_reach_selected_port() {
        let mut nes = make_nes(&[]);
        nes.set_buttons(Port::Two, 0x81);
        assert_eq!(nes.controller(Port::Two).buttons(), 0x81);
        assert_eq!(nes.controller(Port::One).buttons(), 0);

        let bus = nes.bus_mut();
        bus.write(0x4016, 1).expect("mapped");
        bus.write(0x4016, 0).expect("mapped");
        assert_eq!(bus.read(0x4017), Ok(1));
        assert_eq!(bus.read(0x4016), Ok(0));
    }
}
