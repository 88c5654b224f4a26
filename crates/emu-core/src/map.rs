//! Address routing.
//!
//! An [`AddressMap`] is an ordered list of inclusive address ranges, each
//! tagged with a device handle. Reads go to the first region that matches;
//! writes go to every region that matches, so a debug tap can shadow a
//! normal region without disturbing it.

use crate::{Bus, BusError, Memory};

/// One mapped range, `start..=end`, and the device that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<D> {
    pub start: u16,
    pub end: u16,
    pub device: D,
}

impl<D> Region<D> {
    #[must_use]
    pub fn contains(&self, address: u16) -> bool {
        (self.start..=self.end).contains(&address)
    }

    /// Offset of `address` from the start of this region.
    #[must_use]
    pub fn offset(&self, address: u16) -> usize {
        usize::from(address - self.start)
    }
}

/// Ordered routing table from addresses to device handles.
#[derive(Debug, Clone)]
pub struct AddressMap<D> {
    regions: Vec<Region<D>>,
}

impl<D: Copy> AddressMap<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Map `start..=end` to `device`. Later entries never shadow earlier
    /// ones on read.
    pub fn map(&mut self, start: u16, end: u16, device: D) -> &mut Self {
        debug_assert!(start <= end, "region ${start:04X}-${end:04X} is inverted");
        self.regions.push(Region { start, end, device });
        self
    }

    /// Map `len` bytes starting at `start`. The range is clipped at $FFFF.
    pub fn map_len(&mut self, start: u16, len: usize, device: D) -> &mut Self {
        debug_assert!(len > 0, "region at ${start:04X} is empty");
        let last = (usize::from(start) + len.max(1) - 1).min(0xFFFF);
        self.map(start, last as u16, device)
    }

    /// The device that answers a read, with the offset it sees.
    #[must_use]
    pub fn first(&self, address: u16) -> Option<(D, usize)> {
        self.regions
            .iter()
            .find(|r| r.contains(address))
            .map(|r| (r.device, r.offset(address)))
    }

    /// Every device that receives a write, with their offsets.
    pub fn all(&self, address: u16) -> impl Iterator<Item = (D, usize)> + '_ {
        self.regions
            .iter()
            .filter(move |r| r.contains(address))
            .map(move |r| (r.device, r.offset(address)))
    }

    #[must_use]
    pub fn regions(&self) -> &[Region<D>] {
        &self.regions
    }
}

impl<D: Copy> Default for AddressMap<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Bus`] assembled from boxed backing stores.
///
/// The bus owns its stores; callers reach them again through
/// [`MappedMemory::device`].
#[derive(Default)]
pub struct MappedMemory {
    devices: Vec<Box<dyn Memory>>,
    map: AddressMap<usize>,
}

impl MappedMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store and map it at `start..=end`. Returns its handle.
    pub fn map(&mut self, start: u16, end: u16, memory: impl Memory + 'static) -> usize {
        let handle = self.devices.len();
        self.devices.push(Box::new(memory));
        self.map.map(start, end, handle);
        handle
    }

    /// Map an already-added store at a further range.
    pub fn alias(&mut self, start: u16, end: u16, handle: usize) {
        self.map.map(start, end, handle);
    }

    #[must_use]
    pub fn device(&self, handle: usize) -> Option<&dyn Memory> {
        self.devices.get(handle).map(AsRef::as_ref)
    }
}

impl Bus for MappedMemory {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        let (handle, offset) = self.map.first(address).ok_or(BusError::Unmapped(address))?;
        Ok(self.devices[handle].read(offset))
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        let mut hit = false;
        for (handle, offset) in self.map.all(address) {
            self.devices[handle].write(offset, value);
            hit = true;
        }
        if hit {
            Ok(())
        } else {
            Err(BusError::Unmapped(address))
        }
    }

    fn peek(&self, address: u16) -> Option<u8> {
        let (handle, offset) = self.map.first(address)?;
        Some(self.devices[handle].peek(offset))
    }
}
