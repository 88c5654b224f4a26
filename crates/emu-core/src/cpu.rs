//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. Unlike other
/// `Tickable` components, CPUs take a bus reference in their tick method
/// because they need to access memory on specific cycles.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Fatal condition raised by the core (bus fault, halting opcode).
    type Error;

    /// Advance the CPU by exactly one clock cycle.
    ///
    /// The bus is passed in, not owned, so the caller can interleave other
    /// bus masters (DMA) between ticks.
    fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error>;

    /// Tick until the current instruction or interrupt sequence completes.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Force the program counter.
    fn set_program_counter(&mut self, value: u16);

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU has stopped on a halting opcode.
    fn is_halted(&self) -> bool;

    /// Request a maskable interrupt. Returns true if it was latched.
    fn request_irq(&mut self) -> bool;

    /// Request a non-maskable interrupt.
    fn request_nmi(&mut self);

    /// Request a reset, serviced at the next instruction boundary.
    fn request_reset(&mut self);
}
