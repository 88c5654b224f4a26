//! A loaded iNES image bound to its mapper.

use std::sync::Arc;

use emu_core::Memory;

use crate::header::HEADER_LEN;
use crate::{CartridgeError, Header, Mapper, Mirroring, PRG_WINDOW_SIZE, mapper};

/// A loaded cartridge: parsed header, ROM contents and the mapper bound
/// to them.
///
/// As a [`Memory`] the cartridge covers the 32K program window; offset 0
/// is CPU address $8000.
pub struct Cartridge {
    name: String,
    header: Header,
    prg_rom: Arc<[u8]>,
    chr_rom: Arc<[u8]>,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Parse an iNES image.
    ///
    /// `name` identifies the image in errors and logs.
    ///
    /// # Errors
    ///
    /// Returns a [`CartridgeError`] for a bad magic, a header declaring no
    /// PRG banks, an image shorter than the header declares, or a mapper
    /// number with no implementation.
    pub fn load(data: &[u8], name: &str) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::Truncated {
                name: name.to_owned(),
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        let header = Header::parse(data).ok_or_else(|| CartridgeError::InvalidMagic {
            name: name.to_owned(),
        })?;

        if header.prg_rom_banks == 0 {
            return Err(CartridgeError::NoProgramBanks {
                name: name.to_owned(),
            });
        }

        let expected = header.image_len();
        if data.len() < expected {
            return Err(CartridgeError::Truncated {
                name: name.to_owned(),
                expected,
                actual: data.len(),
            });
        }

        // Trainer, when present, sits between header and PRG and is skipped
        let prg_start = header.prg_offset();
        let chr_start = prg_start + header.prg_len();
        let prg_rom: Arc<[u8]> = Arc::from(&data[prg_start..chr_start]);
        let chr_rom: Arc<[u8]> = Arc::from(&data[chr_start..chr_start + header.chr_len()]);

        let mapper = mapper::create(name, &header, &prg_rom, &chr_rom)?;

        log::info!(
            "{name}: mapper {}, {} KB PRG, {} KB CHR, {:?} mirroring{}",
            header.mapper_number,
            prg_rom.len() / 1024,
            chr_rom.len() / 1024,
            header.mirroring,
            if header.has_battery { ", battery" } else { "" },
        );

        Ok(Self {
            name: name.to_owned(),
            header,
            prg_rom,
            chr_rom,
            mapper,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn program_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    #[must_use]
    pub fn character_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    #[must_use]
    pub fn program_length(&self) -> usize {
        self.prg_rom.len()
    }

    #[must_use]
    pub fn character_length(&self) -> usize {
        self.chr_rom.len()
    }

    #[must_use]
    pub fn mapper_number(&self) -> u8 {
        self.header.mapper_number
    }

    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.header.mirroring
    }

    #[must_use]
    pub fn has_battery(&self) -> bool {
        self.header.has_battery
    }

    /// PRG RAM size in 8K units as declared by the header.
    #[must_use]
    pub fn program_ram_banks(&self) -> u8 {
        self.header.prg_ram_banks
    }

    #[must_use]
    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_mut(&mut self) -> &mut dyn Mapper {
        self.mapper.as_mut()
    }
}

impl Memory for Cartridge {
    fn read(&mut self, offset: usize) -> u8 {
        self.peek(offset)
    }

    fn write(&mut self, offset: usize, value: u8) {
        if let Ok(addr) = u16::try_from(offset) {
            self.mapper.program_write(addr, value);
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        u16::try_from(offset).map_or(0, |addr| self.mapper.program_read(addr))
    }

    fn len(&self) -> usize {
        PRG_WINDOW_SIZE
    }

    fn name(&self) -> &str {
        "cartridge"
    }
}
