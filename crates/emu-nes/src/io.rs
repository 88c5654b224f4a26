//! Audio/IO register block at $4000-$4017.
//!
//! Audio registers are storage only. $4014 latches a sprite DMA request
//! for the system to pick up, $4016/$4017 are the controller ports.

use emu_core::Memory;

use crate::controller::Controller;

/// Block length: $4000-$4017.
pub const IO_LEN: usize = 0x18;

const OAM_DMA: usize = 0x14;
const JOY1: usize = 0x16;
const JOY2: usize = 0x17;

/// Controller port selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    One,
    Two,
}

/// Storage-backed APU/IO registers with the two controller ports.
#[derive(Debug, Clone, Default)]
pub struct IoRegisters {
    registers: [u8; IO_LEN],
    controllers: [Controller; 2],
    dma_request: Option<u8>,
}

impl IoRegisters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn controller(&self, port: Port) -> &Controller {
        &self.controllers[port as usize]
    }

    pub fn controller_mut(&mut self, port: Port) -> &mut Controller {
        &mut self.controllers[port as usize]
    }

    /// Take the page written to $4014, if any, since the last call.
    pub fn take_dma_request(&mut self) -> Option<u8> {
        self.dma_request.take()
    }

    #[must_use]
    pub fn dma_requested(&self) -> bool {
        self.dma_request.is_some()
    }
}

impl Memory for IoRegisters {
    fn read(&mut self, offset: usize) -> u8 {
        match offset {
            JOY1 => self.controllers[0].read(),
            JOY2 => self.controllers[1].read(),
            _ => self.peek(offset),
        }
    }

    fn write(&mut self, offset: usize, value: u8) {
        match offset {
            OAM_DMA => self.dma_request = Some(value),
            JOY1 => {
                for controller in &mut self.controllers {
                    controller.set_strobe(value & 1 != 0);
                }
            }
            _ => {}
        }
        if let Some(reg) = self.registers.get_mut(offset) {
            *reg = value;
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        match offset {
            JOY1 => self.controllers[0].peek(),
            JOY2 => self.controllers[1].peek(),
            _ => self.registers.get(offset).copied().unwrap_or(0),
        }
    }

    fn len(&self) -> usize {
        IO_LEN
    }

    fn name(&self) -> &str {
        "io"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::button;

    #[test]
    fn strobe_reaches_both_ports() {
        let mut io = IoRegisters::new();
        io.controller_mut(Port::One).set_buttons(button::A);
        io.controller_mut(Port::Two).set_buttons(button::B);
        io.write(JOY1, 1);
        io.write(JOY1, 0);

        assert_eq!(io.read(JOY1), 1);
        assert_eq!(io.read(JOY1), 0);
        assert_eq!(io.read(JOY2), 0);
        assert_eq!(io.read(JOY2), 1);
    }

    #[test]
    fn peek_leaves_controllers_alone() {
        let mut io = IoRegisters::new();
        io.controller_mut(Port::One).set_buttons(button::A);
        io.write(JOY1, 1);
        io.write(JOY1, 0);
        assert_eq!(io.peek(JOY1), 1);
        assert_eq!(io.peek(JOY1), 1);
        assert_eq!(io.read(JOY1), 1);
        assert_eq!(io.peek(JOY1), 0);
    }

    #[test]
    fn dma_write_latches_page_once() {
        let mut io = IoRegisters::new();
        io.write(OAM_DMA, 0x02);
        assert!(io.dma_requested());
        assert_eq!(io.take_dma_request(), Some(0x02));
        assert_eq!(io.take_dma_request(), None);
    }

    #[test]
    fn audio_registers_are_storage() {
        let mut io = IoRegisters::new();
        io.write(0x00, 0x3F);
        io.write(0x15, 0x0F);
        assert_eq!(io.read(0x00), 0x3F);
        assert_eq!(io.read(0x15), 0x0F);
    }
}
