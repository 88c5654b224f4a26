//! Core traits and types for cycle-accurate emulation.
//!
//! A CPU talks to the outside world only through [`Bus`]. Concrete address
//! spaces are assembled from [`Memory`] backing stores routed by an
//! [`AddressMap`]. Time is counted in [`Ticks`], never in wall-clock units.

mod bus;
mod cpu;
mod map;
mod memory;
mod tickable;
mod ticks;

pub use bus::{Bus, BusError, SimpleBus};
pub use cpu::Cpu;
pub use map::{AddressMap, MappedMemory, Region};
pub use memory::{Memory, MemoryBlock, Mirrored};
pub use tickable::Tickable;
pub use ticks::Ticks;
