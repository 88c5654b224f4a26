//! Minimal NES boot tests on synthetic NROM images.
//!
//! Each test builds a mapper-0 ROM as a byte array, powers on, and drives
//! the system by instruction. Covers the reset vector, controller polling
//! through $4016/$4017, and OAM DMA timing.

use std::sync::mpsc::{self, Receiver};

use emu_core::Bus;
use emu_nes::{Nes, NesConfig, Port, button};
use mos_6502::Step;

/// Build a 32K PRG / 8K CHR NROM image with `code` at $8000.
fn build_rom(code: &[u8]) -> Vec<u8> {
    let prg_size = 32768usize;
    let chr_size = 8192usize;
    let mut rom = vec![0u8; 16 + prg_size + chr_size];

    // iNES header
    rom[0..4].copy_from_slice(b"NES\x1a");
    rom[4] = 2; // 2 × 16K PRG banks = 32K
    rom[5] = 1; // 1 × 8K CHR bank
    rom[6] = 0; // Mapper 0, horizontal mirroring
    rom[7] = 0;

    rom[16..16 + code.len()].copy_from_slice(code);

    // Reset vector at $FFFC → $8000 (offset within 32K PRG: $7FFC)
    rom[16 + 0x7FFC] = 0x00;
    rom[16 + 0x7FFD] = 0x80;
    rom
}

fn power_on(code: &[u8]) -> (Nes, Receiver<Step>) {
    let mut nes = Nes::new(&NesConfig::new(build_rom(code), "synthetic.nes"))
        .expect("synthetic ROM parses");
    let (tx, rx) = mpsc::channel();
    nes.set_step_hook(tx);
    (nes, rx)
}

fn run_to(nes: &mut Nes, pc: u16, max_steps: usize) {
    for _ in 0..max_steps {
        if nes.cpu().regs.pc == pc && nes.cpu().is_instruction_complete() {
            return;
        }
        nes.step().expect("no fatal condition");
    }
    panic!(
        "did not reach ${pc:04X} within {max_steps} steps, stuck at ${:04X}",
        nes.cpu().regs.pc
    );
}

#[test]
fn boots_through_reset_vector() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0x78,             // $8000  SEI
        0xD8,             // $8001  CLD
        0xA2, 0xFF,       // $8002  LDX #$FF
        0x9A,             // $8004  TXS
        0x4C, 0x05, 0x80, // $8005  JMP $8005
    ];
    let (mut nes, rx) = power_on(code);

    run_to(&mut nes, 0x8005, 10);
    assert_eq!(nes.cpu().regs.s, 0xFF);

    let steps: Vec<Step> = rx.try_iter().collect();
    assert_eq!(steps[0].pc, 0x8000);
    assert_eq!(steps[0].cycles, 7, "reset takes seven cycles");
    assert_eq!(
        steps.iter().map(|s| s.cycles).collect::<Vec<_>>(),
        [7, 9, 11, 13]
    );
}

#[test]
fn reads_both_controllers() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0xA9, 0x01,       // $8000  LDA #$01
        0x8D, 0x16, 0x40, // $8002  STA $4016   strobe high
        0xA9, 0x00,       // $8005  LDA #$00
        0x8D, 0x16, 0x40, // $8007  STA $4016   latch
        0xAD, 0x16, 0x40, // $800A  LDA $4016   pad 1, A
        0x85, 0x10,       // $800D  STA $10
        0xAD, 0x16, 0x40, // $800F  LDA $4016   pad 1, B
        0x85, 0x11,       // $8012  STA $11
        0xAD, 0x17, 0x40, // $8014  LDA $4017   pad 2, A
        0x85, 0x12,       // $8017  STA $12
        0xAD, 0x17, 0x40, // $8019  LDA $4017   pad 2, B
        0x85, 0x13,       // $801C  STA $13
        0x4C, 0x1E, 0x80, // $801E  JMP $801E
    ];
    let (mut nes, _rx) = power_on(code);
    nes.set_buttons(Port::One, button::A);
    nes.set_buttons(Port::Two, button::B | button::START);

    run_to(&mut nes, 0x801E, 40);
    assert_eq!(&nes.bus().ram()[0x10..0x14], &[1, 0, 0, 1]);
}

#[test]
fn oam_dma_copies_page_and_steals_cycles() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0xA9, 0x02,       // $8000  LDA #$02
        0x8D, 0x14, 0x40, // $8002  STA $4014   ends on cycle 13 (odd)
        0xEA,             // $8005  NOP
        0x4C, 0x06, 0x80, // $8006  JMP $8006
    ];
    let (mut nes, rx) = power_on(code);
    for i in 0..=255u8 {
        nes.bus_mut().write(0x0200 + u16::from(i), i ^ 0x5A).expect("RAM");
    }

    run_to(&mut nes, 0x8006, 10);

    let nop = rx.try_iter().find(|s| s.pc == 0x8005).expect("NOP traced");
    assert_eq!(nop.cycles, 13 + 514);
    let oam = nes.bus().ppu().oam();
    assert!((0..=255u8).all(|i| oam[usize::from(i)] == i ^ 0x5A));
}

#[test]
fn oam_dma_from_even_cycle_takes_513() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0xA9, 0x02,       // $8000  LDA #$02
        0xA6, 0x00,       // $8002  LDX $00
        0x8D, 0x14, 0x40, // $8004  STA $4014   ends on cycle 16 (even)
        0xEA,             // $8007  NOP
        0x4C, 0x08, 0x80, // $8008  JMP $8008
    ];
    let (mut nes, rx) = power_on(code);
    run_to(&mut nes, 0x8008, 10);

    let nop = rx.try_iter().find(|s| s.pc == 0x8007).expect("NOP traced");
    assert_eq!(nop.cycles, 16 + 513);
}

#[test]
fn cycle_driving_matches_step_driving() {
    #[rustfmt::skip]
    let code: &[u8] = &[
        0xA9, 0x02,       // $8000  LDA #$02
        0x8D, 0x14, 0x40, // $8002  STA $4014
        0xEA,             // $8005  NOP
        0x4C, 0x06, 0x80, // $8006  JMP $8006
    ];
    let (mut nes, _rx) = power_on(code);

    let mut dma_ticks = 0;
    while nes.cycles().get() < 13 + 514 {
        nes.tick().expect("tick");
        if nes.dma_active() {
            dma_ticks += 1;
        }
    }
    // The final DMA tick leaves DMA inactive
    assert_eq!(dma_ticks, 513);
    assert!(!nes.dma_active());
    assert_eq!(nes.cpu().regs.pc, 0x8005);
}
