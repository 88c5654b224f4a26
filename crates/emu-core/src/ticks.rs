//! The fundamental unit of time in the emulator.

use std::fmt;

/// A count of clock ticks.
///
/// All timing is expressed in whole bus cycles since power-on. The count
/// never resets and never consults the host clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True on odd cycles. OAM DMA needs an extra alignment cycle when it
    /// starts on one.
    #[must_use]
    pub const fn is_odd(self) -> bool {
        self.0 & 1 == 1
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::ops::Add for Ticks {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::ops::AddAssign for Ticks {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl core::ops::Sub for Ticks {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_and_parity() {
        let mut t = Ticks::new(7);
        assert!(t.is_odd());
        t += Ticks::new(1);
        assert!(!t.is_odd());
        assert_eq!((t - Ticks::new(10)).get(), 0);
        assert_eq!((t + Ticks::new(2)).to_string(), "10");
    }
}
