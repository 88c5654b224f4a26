//! Memory and I/O bus interface.

use thiserror::Error;

/// Failure raised by a bus access.
///
/// A correctly assembled address space maps every address, so this only
/// fires on a wiring bug. It is never papered over with a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// No region claims the address.
    #[error("unmapped address ${0:04X}")]
    Unmapped(u16),
}

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device.
pub trait Bus {
    /// Read a byte from the given address.
    ///
    /// Reads may have side effects on devices (shift registers, latches).
    fn read(&mut self, address: u16) -> Result<u8, BusError>;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError>;

    /// Read a byte without any device side effects.
    ///
    /// Used by debuggers and trace hooks. Returns `None` for unmapped
    /// addresses.
    fn peek(&self, address: u16) -> Option<u8>;
}

/// Flat 64K RAM bus, every address mapped.
///
/// Used for CPU tests where no memory map is needed.
pub struct SimpleBus {
    memory: Box<[u8; 0x10000]>,
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.memory[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        Ok(self.memory[usize::from(address)])
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        self.memory[usize::from(address)] = value;
        Ok(())
    }

    fn peek(&self, address: u16) -> Option<u8> {
        Some(self.memory[usize::from(address)])
    }
}
