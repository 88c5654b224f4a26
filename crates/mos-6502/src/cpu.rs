//! 6502 CPU implementation.
//!
//! Cycle-accurate emulation where each `tick()` performs exactly one
//! bus access. Instructions are broken down into their component cycles.
//!
//! `cycle` counts micro-steps of the current instruction: 1 is the opcode
//! fetch, 2 onwards are execution. `interrupt_cycle` counts the seven
//! steps of an RST/NMI/IRQ sequence. Both rest at 1 between instructions,
//! and pending interrupts are only sampled there.

use emu_core::{Bus, Cpu, Ticks};

use crate::error::CpuError;
use crate::flags::I;
use crate::opcodes::{Access, Mnemonic, Mode, Opcode};
use crate::trace::{Step, StepHook};
use crate::Registers;

/// Interrupt kinds, each with its own vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Irq,
    Nmi,
    Reset,
}

impl Interrupt {
    /// Address of the vector's low byte.
    #[must_use]
    pub const fn vector(self) -> u16 {
        match self {
            Self::Nmi => 0xFFFA,
            Self::Reset => 0xFFFC,
            Self::Irq => 0xFFFE,
        }
    }
}

/// The MOS 6502 CPU.
///
/// Implements cycle-accurate execution where each `tick()` advances
/// exactly one CPU cycle. The 6502 performs one bus access per cycle.
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,
    /// Opcode being executed.
    opcode: u8,
    /// Micro-step within the current instruction (1 = fetch).
    cycle: u8,
    /// Micro-step within the current interrupt sequence (1 = idle).
    interrupt_cycle: u8,
    /// Latched request, sampled at the next instruction boundary.
    pending: Option<Interrupt>,
    /// Sequence in progress, fixed when it starts.
    servicing: Option<Interrupt>,
    /// Effective address.
    addr: u16,
    /// Unindexed base address, kept for the SHA/SHX/SHY/TAS quirk.
    base: u16,
    /// Zero-page pointer for indexed and indirect modes.
    pointer: u8,
    /// Operand latch.
    data: u8,
    /// Indexing carried into the high byte.
    crossed: bool,
    /// Address and opcode of the KIL that stopped the CPU.
    halted: Option<(u16, u8)>,
    /// Cycles since power-on.
    cycles: Ticks,
    hook: Option<Box<dyn StepHook>>,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    /// A CPU at power-on, with the reset sequence pending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            opcode: 0,
            cycle: 1,
            interrupt_cycle: 1,
            pending: Some(Interrupt::Reset),
            servicing: None,
            addr: 0,
            base: 0,
            pointer: 0,
            data: 0,
            crossed: false,
            halted: None,
            cycles: Ticks::ZERO,
            hook: None,
        }
    }

    /// Advance exactly one clock cycle.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        if let Some((pc, opcode)) = self.halted {
            return Err(CpuError::Halted { pc, opcode });
        }

        let result = match (self.servicing, self.pending) {
            (Some(kind), _) => self.interrupt_tick(bus, kind),
            (None, Some(kind)) if self.cycle == 1 => self.interrupt_tick(bus, kind),
            _ if self.cycle == 1 => self.fetch(bus),
            _ => self.execute(bus),
        };
        self.cycles += Ticks::new(1);
        result
    }

    /// Tick until one instruction or interrupt sequence has completed.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        loop {
            self.tick(bus)?;
            if self.is_instruction_complete() {
                return Ok(());
            }
        }
    }

    /// Burn one cycle off the bus. Used while DMA owns the bus.
    pub fn stall(&mut self) {
        self.cycles += Ticks::new(1);
    }

    /// True between instructions: the next tick fetches an opcode or
    /// starts an interrupt sequence.
    #[must_use]
    pub fn is_instruction_complete(&self) -> bool {
        self.cycle == 1 && self.interrupt_cycle == 1
    }

    /// Cycles elapsed since power-on.
    #[must_use]
    pub fn cycles(&self) -> Ticks {
        self.cycles
    }

    #[must_use]
    pub fn pending_interrupt(&self) -> Option<Interrupt> {
        self.pending
    }

    pub fn set_program_counter(&mut self, value: u16) {
        self.regs.pc = value;
    }

    /// Latch an IRQ. Ignored while the I flag is set, and never displaces
    /// a pending NMI or reset.
    pub fn request_irq(&mut self) -> bool {
        if self.regs.p.is_set(I) || self.pending.is_some() {
            return false;
        }
        self.pending = Some(Interrupt::Irq);
        true
    }

    pub fn request_nmi(&mut self) {
        self.pending = Some(Interrupt::Nmi);
    }

    pub fn request_reset(&mut self) {
        self.pending = Some(Interrupt::Reset);
    }

    /// Install the per-instruction hook, replacing any previous one.
    pub fn set_step_hook(&mut self, hook: impl StepHook + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Remove and return the per-instruction hook.
    pub fn take_step_hook(&mut self) -> Option<Box<dyn StepHook>> {
        self.hook.take()
    }

    fn fetch<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        let pc = self.regs.pc;
        self.opcode = bus.read(pc)?;
        self.notify(bus, pc);
        self.regs.pc = pc.wrapping_add(1);

        if Opcode::decode(self.opcode).mnemonic == Mnemonic::Kil {
            log::error!("KIL opcode ${:02X} at ${pc:04X}, CPU halted", self.opcode);
            self.halted = Some((pc, self.opcode));
            return Err(CpuError::Halted {
                pc,
                opcode: self.opcode,
            });
        }
        self.cycle = 2;
        Ok(())
    }

    fn notify<B: Bus>(&mut self, bus: &B, pc: u16) {
        if self.hook.is_none() {
            return;
        }
        let len = Opcode::decode(self.opcode).len();
        let mut operands = [0; 2];
        for (i, byte) in operands.iter_mut().enumerate().take(usize::from(len) - 1) {
            *byte = bus.peek(pc.wrapping_add(i as u16 + 1)).unwrap_or(0);
        }
        let step = Step {
            pc,
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            p: self.regs.p.bits(),
            s: self.regs.s,
            opcode: self.opcode,
            operands,
            len,
            cycles: self.cycles.get(),
        };
        if let Some(hook) = self.hook.as_mut() {
            hook.on_step(&step);
        }
    }

    /// Finish current instruction and return to opcode fetch.
    fn finish(&mut self) {
        self.cycle = 1;
    }

    /// Read the byte at PC and advance PC.
    fn fetch_operand<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError> {
        let value = bus.read(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) -> Result<(), CpuError> {
        let addr = self.regs.push();
        bus.write(addr, value)?;
        Ok(())
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError> {
        let addr = self.regs.pop();
        Ok(bus.read(addr)?)
    }

    // ========================================================================
    // Interrupt sequences
    // ========================================================================

    /// One step of RST/NMI/IRQ entry. Seven ticks; RST replaces the three
    /// pushes with stack reads that still decrement S.
    fn interrupt_tick<B: Bus>(&mut self, bus: &mut B, kind: Interrupt) -> Result<(), CpuError> {
        match self.interrupt_cycle {
            1 => {
                log::debug!("{kind:?} sequence at ${:04X}", self.regs.pc);
                self.servicing = Some(kind);
                bus.read(self.regs.pc)?;
            }
            2 => {
                bus.read(self.regs.pc)?;
            }
            3..=5 if kind == Interrupt::Reset => {
                bus.read(self.regs.stack_addr())?;
                self.regs.s = self.regs.s.wrapping_sub(1);
            }
            3 => self.push(bus, (self.regs.pc >> 8) as u8)?,
            4 => self.push(bus, self.regs.pc as u8)?,
            5 => self.push(bus, self.regs.p.to_byte_irq())?,
            6 => {
                self.data = bus.read(kind.vector())?;
                self.regs.p.set(I);
            }
            7 => {
                let hi = bus.read(kind.vector().wrapping_add(1))?;
                self.regs.pc = u16::from(self.data) | (u16::from(hi) << 8);
                self.servicing = None;
                if self.pending == Some(kind) {
                    self.pending = None;
                }
                self.interrupt_cycle = 1;
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.interrupt_cycle += 1;
        Ok(())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        let op = Opcode::decode(self.opcode);
        match (op.mnemonic.access(), op.mode) {
            (Access::Control, _) => self.control(bus, op),
            (_, Mode::Implied | Mode::Accumulator) => self.implied(bus, op.mnemonic),
            (Access::Read, mode) => self.read_op(bus, op.mnemonic, mode),
            (Access::Write, mode) => self.write_op(bus, op.mnemonic, mode),
            (Access::Modify, mode) => self.modify_op(bus, op.mnemonic, mode),
        }
    }

    fn control<B: Bus>(&mut self, bus: &mut B, op: Opcode) -> Result<(), CpuError> {
        match op.mnemonic {
            Mnemonic::Brk => self.op_brk(bus),
            Mnemonic::Jsr => self.op_jsr(bus),
            Mnemonic::Rti => self.op_rti(bus),
            Mnemonic::Rts => self.op_rts(bus),
            Mnemonic::Pha | Mnemonic::Php => self.op_push(bus, op.mnemonic),
            Mnemonic::Pla | Mnemonic::Plp => self.op_pull(bus, op.mnemonic),
            Mnemonic::Jmp if op.mode == Mode::Indirect => self.op_jmp_ind(bus),
            Mnemonic::Jmp => self.op_jmp_abs(bus),
            // KIL never gets past the fetch.
            Mnemonic::Kil => unreachable!(),
            branch => {
                let taken = self.branch_taken(branch);
                self.op_branch(bus, taken)
            }
        }
    }

    /// Two-cycle single-byte instructions: a dummy read of the next byte.
    fn implied<B: Bus>(&mut self, bus: &mut B, mnemonic: Mnemonic) -> Result<(), CpuError> {
        bus.read(self.regs.pc)?;
        self.apply_implied(mnemonic);
        self.finish();
        Ok(())
    }

    // ========================================================================
    // Addressing
    // ========================================================================

    /// Micro-step at which a write or read-modify-write touches its
    /// effective address. Indexed modes always spend the fix-up cycle.
    const fn access_cycle(mode: Mode) -> u8 {
        match mode {
            Mode::ZeroPage => 3,
            Mode::ZeroPageX | Mode::ZeroPageY | Mode::Absolute => 4,
            Mode::AbsoluteX | Mode::AbsoluteY => 5,
            Mode::IndexedIndirect | Mode::IndirectIndexed => 6,
            _ => 2,
        }
    }

    /// Perform this cycle's addressing work.
    ///
    /// Returns `true` when `addr` is final and the operand access belongs to
    /// this same tick. Reads skip the page fix-up cycle when indexing did
    /// not carry.
    fn resolve<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: Mode,
        access: Access,
    ) -> Result<bool, CpuError> {
        match (mode, self.cycle) {
            (Mode::Immediate, _) => {
                self.addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Ok(true)
            }

            (Mode::ZeroPage, 2) => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                Ok(false)
            }

            (Mode::ZeroPageX | Mode::ZeroPageY, 2) => {
                self.pointer = self.fetch_operand(bus)?;
                Ok(false)
            }
            (Mode::ZeroPageX | Mode::ZeroPageY, 3) => {
                // Dummy read while adding the index (wraps in zero page)
                bus.read(u16::from(self.pointer))?;
                let index = if mode == Mode::ZeroPageX { self.regs.x } else { self.regs.y };
                self.addr = u16::from(self.pointer.wrapping_add(index));
                Ok(false)
            }

            (Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY, 2) => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                Ok(false)
            }
            (Mode::Absolute, 3) => {
                self.addr |= u16::from(self.fetch_operand(bus)?) << 8;
                Ok(false)
            }
            (Mode::AbsoluteX | Mode::AbsoluteY, 3) => {
                let hi = self.fetch_operand(bus)?;
                let index = if mode == Mode::AbsoluteX { self.regs.x } else { self.regs.y };
                self.index_base(hi, index);
                Ok(false)
            }
            (Mode::AbsoluteX | Mode::AbsoluteY, 4) => self.fix_page(bus, access),

            (Mode::IndexedIndirect, 2) => {
                self.pointer = self.fetch_operand(bus)?;
                Ok(false)
            }
            (Mode::IndexedIndirect, 3) => {
                bus.read(u16::from(self.pointer))?;
                self.pointer = self.pointer.wrapping_add(self.regs.x);
                Ok(false)
            }
            (Mode::IndexedIndirect, 4) => {
                self.addr = u16::from(bus.read(u16::from(self.pointer))?);
                Ok(false)
            }
            (Mode::IndexedIndirect, 5) => {
                // High byte pointer wraps in zero page
                let hi = bus.read(u16::from(self.pointer.wrapping_add(1)))?;
                self.addr |= u16::from(hi) << 8;
                Ok(false)
            }

            (Mode::IndirectIndexed, 2) => {
                self.pointer = self.fetch_operand(bus)?;
                Ok(false)
            }
            (Mode::IndirectIndexed, 3) => {
                self.addr = u16::from(bus.read(u16::from(self.pointer))?);
                Ok(false)
            }
            (Mode::IndirectIndexed, 4) => {
                let hi = bus.read(u16::from(self.pointer.wrapping_add(1)))?;
                self.index_base(hi, self.regs.y);
                Ok(false)
            }
            (Mode::IndirectIndexed, 5) => self.fix_page(bus, access),

            _ => Ok(true),
        }
    }

    /// Combine the low byte in `addr` with `hi`, add the index to the low
    /// byte only, and note whether the high byte still needs a carry.
    fn index_base(&mut self, hi: u8, index: u8) {
        self.base = u16::from(self.addr as u8) | (u16::from(hi) << 8);
        let lo = (self.addr as u8).wrapping_add(index);
        self.addr = u16::from(lo) | (u16::from(hi) << 8);
        self.crossed = lo < index;
    }

    /// The page fix-up cycle: a dummy read at the uncarried address. Reads
    /// that did not cross skip it and access the operand immediately.
    fn fix_page<B: Bus>(&mut self, bus: &mut B, access: Access) -> Result<bool, CpuError> {
        if !self.crossed && access == Access::Read {
            return Ok(true);
        }
        bus.read(self.addr)?;
        if self.crossed {
            self.addr = self.addr.wrapping_add(0x100);
        }
        Ok(false)
    }

    fn read_op<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        mode: Mode,
    ) -> Result<(), CpuError> {
        if self.resolve(bus, mode, Access::Read)? {
            let value = bus.read(self.addr)?;
            self.apply_read(mnemonic, value);
            self.finish();
        } else {
            self.cycle += 1;
        }
        Ok(())
    }

    fn write_op<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        mode: Mode,
    ) -> Result<(), CpuError> {
        if self.cycle == Self::access_cycle(mode) {
            let (addr, value) = self.store_value(mnemonic);
            bus.write(addr, value)?;
            self.finish();
        } else {
            self.resolve(bus, mode, Access::Write)?;
            self.cycle += 1;
        }
        Ok(())
    }

    /// Read, write the unmodified value back, then write the result.
    fn modify_op<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        mode: Mode,
    ) -> Result<(), CpuError> {
        let first = Self::access_cycle(mode);
        match self.cycle.checked_sub(first) {
            None => {
                self.resolve(bus, mode, Access::Modify)?;
            }
            Some(0) => {
                self.data = bus.read(self.addr)?;
            }
            Some(1) => {
                bus.write(self.addr, self.data)?;
                self.data = self.apply_modify(mnemonic, self.data);
            }
            Some(_) => {
                bus.write(self.addr, self.data)?;
                self.finish();
                return Ok(());
            }
        }
        self.cycle += 1;
        Ok(())
    }

    /// Address and value for a store. The undocumented SH*/TAS stores AND
    /// the value with the base high byte plus one, and on a page cross
    /// that value replaces the high byte of the address.
    fn store_value(&mut self, mnemonic: Mnemonic) -> (u16, u8) {
        let regs = &self.regs;
        match mnemonic {
            Mnemonic::Sta => (self.addr, regs.a),
            Mnemonic::Stx => (self.addr, regs.x),
            Mnemonic::Sty => (self.addr, regs.y),
            Mnemonic::Sax => (self.addr, regs.a & regs.x),
            Mnemonic::Sha => self.unstable_store(regs.a & regs.x),
            Mnemonic::Shx => self.unstable_store(regs.x),
            Mnemonic::Shy => self.unstable_store(regs.y),
            Mnemonic::Tas => {
                self.regs.s = self.regs.a & self.regs.x;
                self.unstable_store(self.regs.s)
            }
            _ => unreachable!("{mnemonic:?} is not a store"),
        }
    }

    fn unstable_store(&self, value: u8) -> (u16, u8) {
        let value = value & ((self.base >> 8) as u8).wrapping_add(1);
        let addr = if self.crossed {
            (u16::from(value) << 8) | (self.addr & 0x00FF)
        } else {
            self.addr
        };
        (addr, value)
    }

    // ========================================================================
    // Individual instruction implementations
    // ========================================================================

    fn op_brk<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                // Padding byte (ignored but PC incremented)
                self.fetch_operand(bus)?;
            }
            3 => self.push(bus, (self.regs.pc >> 8) as u8)?,
            4 => self.push(bus, self.regs.pc as u8)?,
            5 => self.push(bus, self.regs.p.to_byte_brk())?,
            6 => {
                self.data = bus.read(Interrupt::Irq.vector())?;
                self.regs.p.set(I);
            }
            7 => {
                let hi = bus.read(Interrupt::Irq.vector() + 1)?;
                self.regs.pc = u16::from(self.data) | (u16::from(hi) << 8);
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }

    fn op_rti<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                bus.read(self.regs.pc)?;
            }
            3 => {
                bus.read(self.regs.stack_addr())?;
            }
            4 => {
                let p = self.pull(bus)?;
                self.regs.p = crate::Status::from_pulled(p);
            }
            5 => {
                self.addr = u16::from(self.pull(bus)?);
            }
            6 => {
                self.addr |= u16::from(self.pull(bus)?) << 8;
                self.regs.pc = self.addr;
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }

    fn op_rts<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                bus.read(self.regs.pc)?;
            }
            3 => {
                bus.read(self.regs.stack_addr())?;
            }
            4 => {
                self.addr = u16::from(self.pull(bus)?);
            }
            5 => {
                self.addr |= u16::from(self.pull(bus)?) << 8;
            }
            6 => {
                // RTS returns to the pulled address + 1
                bus.read(self.addr)?;
                self.regs.pc = self.addr.wrapping_add(1);
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }

    fn op_jsr<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
            }
            3 => {
                // Internal operation (stack read)
                bus.read(self.regs.stack_addr())?;
            }
            4 => self.push(bus, (self.regs.pc >> 8) as u8)?,
            5 => self.push(bus, self.regs.pc as u8)?,
            6 => {
                self.addr |= u16::from(bus.read(self.regs.pc)?) << 8;
                self.regs.pc = self.addr;
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }

    fn op_jmp_abs<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
                self.cycle = 3;
            }
            3 => {
                self.addr |= u16::from(bus.read(self.regs.pc)?) << 8;
                self.regs.pc = self.addr;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn op_jmp_ind<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                self.addr = u16::from(self.fetch_operand(bus)?);
            }
            3 => {
                self.addr |= u16::from(self.fetch_operand(bus)?) << 8;
            }
            4 => {
                self.data = bus.read(self.addr)?;
            }
            5 => {
                // 6502 bug: the high byte comes from the same page
                let hi_addr = (self.addr & 0xFF00) | (self.addr.wrapping_add(1) & 0x00FF);
                let hi = bus.read(hi_addr)?;
                self.regs.pc = u16::from(self.data) | (u16::from(hi) << 8);
                self.finish();
                return Ok(());
            }
            _ => unreachable!(),
        }
        self.cycle += 1;
        Ok(())
    }

    fn op_branch<B: Bus>(&mut self, bus: &mut B, taken: bool) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                self.data = self.fetch_operand(bus)?;
                if taken {
                    self.cycle = 3;
                } else {
                    self.finish();
                }
            }
            3 => {
                bus.read(self.regs.pc)?;
                let offset = i16::from(self.data as i8);
                let target = self.regs.pc.wrapping_add(offset as u16);
                if (target ^ self.regs.pc) & 0xFF00 == 0 {
                    self.regs.pc = target;
                    self.finish();
                } else {
                    self.addr = target;
                    self.cycle = 4;
                }
            }
            4 => {
                // Page boundary crossed: read with the old high byte
                bus.read((self.regs.pc & 0xFF00) | (self.addr & 0x00FF))?;
                self.regs.pc = self.addr;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn op_push<B: Bus>(&mut self, bus: &mut B, mnemonic: Mnemonic) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                bus.read(self.regs.pc)?;
                self.cycle = 3;
            }
            3 => {
                let value = if mnemonic == Mnemonic::Php {
                    self.regs.p.to_byte_brk()
                } else {
                    self.regs.a
                };
                self.push(bus, value)?;
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    fn op_pull<B: Bus>(&mut self, bus: &mut B, mnemonic: Mnemonic) -> Result<(), CpuError> {
        match self.cycle {
            2 => {
                bus.read(self.regs.pc)?;
                self.cycle = 3;
            }
            3 => {
                bus.read(self.regs.stack_addr())?;
                self.cycle = 4;
            }
            4 => {
                let value = self.pull(bus)?;
                if mnemonic == Mnemonic::Plp {
                    self.regs.p = crate::Status::from_pulled(value);
                } else {
                    self.regs.a = value;
                    self.regs.p.update_nz(value);
                }
                self.finish();
            }
            _ => unreachable!(),
        }
        Ok(())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = CpuError;

    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        Mos6502::tick(self, bus)
    }

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        Mos6502::step(self, bus)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn set_program_counter(&mut self, value: u16) {
        Mos6502::set_program_counter(self, value);
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    fn request_irq(&mut self) -> bool {
        Mos6502::request_irq(self)
    }

    fn request_nmi(&mut self) {
        Mos6502::request_nmi(self);
    }

    fn request_reset(&mut self) {
        Mos6502::request_reset(self);
    }
}
