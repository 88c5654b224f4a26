//! The 16-byte iNES header.

use crate::{CHR_BANK_SIZE, PRG_BANK_SIZE};

/// Length of the header itself.
pub const HEADER_LEN: usize = 16;
/// Length of the optional trainer block.
pub const TRAINER_LEN: usize = 512;

const MAGIC: [u8; 4] = *b"NES\x1a";

/// Nametable mirroring mode.
///
/// `FourScreen` means the board supplies its own nametable RAM, so there
/// is no mirroring at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// Parsed iNES file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub prg_rom_banks: u8,
    pub chr_rom_banks: u8,
    pub mapper_number: u8,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    pub has_trainer: bool,
    /// Byte 8, PRG RAM size in 8 KB units. Informational only.
    pub prg_ram_banks: u8,
}

impl Header {
    /// Decode the header fields. `None` if the slice is short or the magic
    /// is wrong; the caller turns that into a named error.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_LEN] = bytes.get(..HEADER_LEN)?.try_into().ok()?;
        if bytes[..4] != MAGIC {
            return None;
        }
        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Some(Self {
            prg_rom_banks: bytes[4],
            chr_rom_banks: bytes[5],
            mapper_number: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
            prg_ram_banks: bytes[8],
        })
    }

    /// PRG ROM size in bytes.
    #[must_use]
    pub fn prg_len(&self) -> usize {
        usize::from(self.prg_rom_banks) * PRG_BANK_SIZE
    }

    /// CHR ROM size in bytes. Zero means the board uses CHR RAM.
    #[must_use]
    pub fn chr_len(&self) -> usize {
        usize::from(self.chr_rom_banks) * CHR_BANK_SIZE
    }

    /// Offset of the first PRG ROM byte in the image.
    #[must_use]
    pub fn prg_offset(&self) -> usize {
        if self.has_trainer {
            HEADER_LEN + TRAINER_LEN
        } else {
            HEADER_LEN
        }
    }

    /// Total image length the header declares.
    #[must_use]
    pub fn image_len(&self) -> usize {
        self.prg_offset() + self.prg_len() + self.chr_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_number_spans_both_flag_bytes() {
        let header = Header::parse(b"NES\x1a\x02\x01\x41\x20\x00\0\0\0\0\0\0\0").expect("valid");
        assert_eq!(header.mapper_number, 0x24);
        assert_eq!(header.mirroring, Mirroring::Vertical);
        assert!(!header.has_battery);
    }

    #[test]
    fn four_screen_overrides_mirroring_bit() {
        let header = Header::parse(b"NES\x1a\x01\x00\x0F\x00\x01\0\0\0\0\0\0\0").expect("valid");
        assert_eq!(header.mirroring, Mirroring::FourScreen);
        assert!(header.has_battery && header.has_trainer);
        assert_eq!(header.prg_ram_banks, 1);
        assert_eq!(header.prg_offset(), 528);
        assert_eq!(header.image_len(), 528 + 16384);
    }

    #[test]
    fn rejects_short_or_foreign_headers() {
        assert_eq!(Header::parse(b"NES\x1a"), None);
        assert_eq!(Header::parse(&[0; 16]), None);
    }
}
