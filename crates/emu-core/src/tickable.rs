//! Trait for components that can be advanced by clock ticks.

use crate::Ticks;

/// A component that can be advanced by clock ticks.
///
/// This is the driver-facing abstraction for cycle-accurate emulation: a
/// whole machine is advanced one tick at a time and reports the first fatal
/// condition it meets.
pub trait Tickable {
    /// Fatal condition that stops the component.
    type Error;

    /// Advance the component by one tick.
    fn tick(&mut self) -> Result<(), Self::Error>;

    /// Advance the component by multiple ticks.
    ///
    /// Default implementation calls `tick()` in a loop and stops at the
    /// first error. Components may override for efficiency, but must
    /// produce identical results.
    fn tick_n(&mut self, count: Ticks) -> Result<(), Self::Error> {
        for _ in 0..count.get() {
            self.tick()?;
        }
        Ok(())
    }
}
