//! NES bus: CPU address routing.
//!
//! Implements `emu_core::Bus` for the NES. Routes CPU addresses to
//! internal RAM, picture-unit registers, the IO block, and cartridge
//! through an [`AddressMap`], so reads take the first matching region and
//! writes reach every matching region.
//!
//! The NES is fully memory-mapped; there is no separate I/O address space.

use emu_core::{AddressMap, Bus, BusError, Memory, MemoryBlock, Mirrored};
use nes_cartridge::Cartridge;

use crate::controller::Controller;
use crate::io::{IO_LEN, IoRegisters, Port};
use crate::ppu::PpuRegisters;

/// Internal RAM size, mirrored every 0x0800 up to $1FFF.
pub const RAM_SIZE: usize = 0x0800;
const EXPANSION_SIZE: usize = 0x6000 - 0x4020;
const SAVE_RAM_SIZE: usize = 0x2000;

/// What answers a region of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Ram,
    Ppu,
    Io,
    /// Disabled APU test registers. Reads 0, writes vanish.
    OpenBus,
    Expansion,
    SaveRam,
    Cartridge,
    /// Store added with [`NesBus::map`], by handle.
    Tap(usize),
}

struct Devices {
    ram: Mirrored<MemoryBlock>,
    ppu: Mirrored<PpuRegisters>,
    io: IoRegisters,
    expansion: MemoryBlock,
    save_ram: MemoryBlock,
    cartridge: Cartridge,
    taps: Vec<Box<dyn Memory>>,
}

impl Devices {
    fn get(&self, device: Device) -> Option<&(dyn Memory + 'static)> {
        match device {
            Device::Ram => Some(&self.ram),
            Device::Ppu => Some(&self.ppu),
            Device::Io => Some(&self.io),
            Device::OpenBus => None,
            Device::Expansion => Some(&self.expansion),
            Device::SaveRam => Some(&self.save_ram),
            Device::Cartridge => Some(&self.cartridge),
            Device::Tap(handle) => self.taps.get(handle).map(|tap| &**tap),
        }
    }

    fn get_mut(&mut self, device: Device) -> Option<&mut (dyn Memory + 'static)> {
        match device {
            Device::Ram => Some(&mut self.ram),
            Device::Ppu => Some(&mut self.ppu),
            Device::Io => Some(&mut self.io),
            Device::OpenBus => None,
            Device::Expansion => Some(&mut self.expansion),
            Device::SaveRam => Some(&mut self.save_ram),
            Device::Cartridge => Some(&mut self.cartridge),
            Device::Tap(handle) => self.taps.get_mut(handle).map(|tap| &mut **tap),
        }
    }
}

/// The NES bus, implementing `emu_core::Bus`.
///
/// The bus owns every device it routes to; the cartridge's mapper is
/// reached through [`NesBus::cartridge`] rather than a second handle.
pub struct NesBus {
    map: AddressMap<Device>,
    devices: Devices,
}

impl NesBus {
    /// The standard console memory map around `cartridge`.
    #[must_use]
    pub fn new(cartridge: Cartridge) -> Self {
        let mut map = AddressMap::new();
        map.map(0x0000, 0x1FFF, Device::Ram)
            .map(0x2000, 0x3FFF, Device::Ppu)
            .map_len(0x4000, IO_LEN, Device::Io)
            .map(0x4018, 0x401F, Device::OpenBus)
            .map(0x4020, 0x5FFF, Device::Expansion)
            .map(0x6000, 0x7FFF, Device::SaveRam)
            .map(0x8000, 0xFFFF, Device::Cartridge);

        Self {
            map,
            devices: Devices {
                ram: Mirrored::new(MemoryBlock::new("ram", RAM_SIZE)),
                ppu: Mirrored::new(PpuRegisters::new()),
                io: IoRegisters::new(),
                expansion: MemoryBlock::new("expansion", EXPANSION_SIZE),
                save_ram: MemoryBlock::new("save-ram", SAVE_RAM_SIZE),
                cartridge,
                taps: Vec::new(),
            },
        }
    }

    /// Add a store at `start..=end` after the standard regions.
    ///
    /// Reads still go to whichever region was mapped first, but writes
    /// reach the new store too, which makes it a write tap over an
    /// existing region. Returns a handle for [`NesBus::tap`].
    pub fn map(&mut self, start: u16, end: u16, memory: impl Memory + 'static) -> usize {
        let handle = self.devices.taps.len();
        self.devices.taps.push(Box::new(memory));
        self.map.map(start, end, Device::Tap(handle));
        handle
    }

    #[must_use]
    pub fn tap(&self, handle: usize) -> Option<&dyn Memory> {
        self.devices.get(Device::Tap(handle))
    }

    #[must_use]
    pub fn address_map(&self) -> &AddressMap<Device> {
        &self.map
    }

    /// Peek a byte from RAM without side effects (for observation).
    #[must_use]
    pub fn peek_ram(&self, addr: u16) -> u8 {
        self.devices.ram.peek(usize::from(addr))
    }

    #[must_use]
    pub fn ram(&self) -> &[u8] {
        self.devices.ram.inner().as_slice()
    }

    #[must_use]
    pub fn ppu(&self) -> &PpuRegisters {
        self.devices.ppu.inner()
    }

    #[must_use]
    pub fn io(&self) -> &IoRegisters {
        &self.devices.io
    }

    #[must_use]
    pub fn controller(&self, port: Port) -> &Controller {
        self.devices.io.controller(port)
    }

    pub fn controller_mut(&mut self, port: Port) -> &mut Controller {
        self.devices.io.controller_mut(port)
    }

    #[must_use]
    pub fn cartridge(&self) -> &Cartridge {
        &self.devices.cartridge
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.devices.cartridge
    }

    /// Take the page of a pending $4014 write.
    pub fn take_dma_request(&mut self) -> Option<u8> {
        self.devices.io.take_dma_request()
    }
}

impl Bus for NesBus {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        let (device, offset) = self.map.first(address).ok_or(BusError::Unmapped(address))?;
        Ok(self
            .devices
            .get_mut(device)
            .map_or(0, |memory| memory.read(offset)))
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        let mut hit = false;
        for (device, offset) in self.map.all(address) {
            hit = true;
            if let Some(memory) = self.devices.get_mut(device) {
                memory.write(offset, value);
            }
        }
        if hit {
            Ok(())
        } else {
            Err(BusError::Unmapped(address))
        }
    }

    fn peek(&self, address: u16) -> Option<u8> {
        let (device, offset) = self.map.first(address)?;
        Some(self.devices.get(device).map_or(0, |memory| memory.peek(offset)))
    }
}
