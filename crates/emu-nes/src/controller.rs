//! NES controller (joypad) emulation.
//!
//! The NES controller is a serial shift register accessed via $4016/$4017.
//! While strobe is high the register continuously reloads from the buttons.
//! Once strobe drops, each read returns one bit and shifts the register right.

/// Button bit masks, in shift order.
pub mod button {
    pub const A: u8 = 0x01;
    pub const B: u8 = 0x02;
    pub const SELECT: u8 = 0x04;
    pub const START: u8 = 0x08;
    pub const UP: u8 = 0x10;
    pub const DOWN: u8 = 0x20;
    pub const LEFT: u8 = 0x40;
    pub const RIGHT: u8 = 0x80;
}

/// NES controller state.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    /// Current button state (bit per button).
    buttons: u8,
    /// Latched shift register.
    shift_register: u8,
    /// Strobe mode: when true, shift register continuously reloads.
    strobe: bool,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole button state. Bit order is A, B, Select, Start,
    /// Up, Down, Left, Right from bit 0.
    pub fn set_buttons(&mut self, mask: u8) {
        self.buttons = mask;
        if self.strobe {
            self.shift_register = self.buttons;
        }
    }

    /// Press or release the buttons in `mask`.
    pub fn set_button(&mut self, mask: u8, pressed: bool) {
        if pressed {
            self.set_buttons(self.buttons | mask);
        } else {
            self.set_buttons(self.buttons & !mask);
        }
    }

    /// Bit 0 of a $4016 write.
    pub fn set_strobe(&mut self, high: bool) {
        self.strobe = high;
        if high {
            self.shift_register = self.buttons;
        }
    }

    /// Read $4016/$4017: return bit 0 of shift register, shift right.
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            // Still reloading, so every read sees button A
            return self.buttons & 1;
        }
        let result = self.shift_register & 1;
        // After all 8 bits are shifted out, reads return 1
        self.shift_register = (self.shift_register >> 1) | 0x80;
        result
    }

    /// The bit the next [`Controller::read`] would return.
    #[must_use]
    pub fn peek(&self) -> u8 {
        if self.strobe {
            self.buttons & 1
        } else {
            self.shift_register & 1
        }
    }

    /// Current button state byte (for observation).
    #[must_use]
    pub fn buttons(&self) -> u8 {
        self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strobe_latch_and_read() {
        let mut c = Controller::new();
        c.set_button(button::A, true);
        c.set_button(button::START, true);

        c.set_strobe(true);
        c.set_strobe(false);

        let bits: Vec<u8> = (0..8).map(|_| c.read()).collect();
        assert_eq!(bits, [1, 0, 0, 1, 0, 0, 0, 0]);
        // Register drained: open bus reads 1
        assert_eq!(c.read(), 1);
        assert_eq!(c.read(), 1);
    }

    #[test]
    fn strobe_high_returns_a_button() {
        let mut c = Controller::new();
        c.set_buttons(button::A);
        c.set_strobe(true);

        assert_eq!(c.read(), 1);
        assert_eq!(c.read(), 1);

        c.set_buttons(0);
        assert_eq!(c.read(), 0);
    }

    #[test]
    fn buttons_set_after_latch_are_not_seen() {
        let mut c = Controller::new();
        c.set_strobe(true);
        c.set_strobe(false);
        c.set_buttons(button::RIGHT);
        assert!((0..8).all(|_| c.read() == 0));
    }

    #[test]
    fn peek_does_not_shift() {
        let mut c = Controller::new();
        c.set_buttons(button::A | button::B);
        c.set_strobe(true);
        c.set_strobe(false);
        assert_eq!(c.peek(), 1);
        assert_eq!(c.peek(), 1);
        assert_eq!(c.read(), 1);
        assert_eq!(c.read(), 1);
        assert_eq!(c.peek(), 0);
    }

    #[test]
    fn buttons_byte() {
        let mut c = Controller::new();
        c.set_button(button::A, true);
        c.set_button(button::B, true);
        c.set_button(button::A, false);
        assert_eq!(c.buttons(), button::B);
    }
}
