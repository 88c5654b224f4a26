//! Board-specific address translation.

use std::sync::Arc;

use crate::nrom::Nrom;
use crate::{CartridgeError, Header};

/// Translates CPU program-space and PPU character-space addresses to
/// cartridge ROM/RAM.
///
/// Addresses are offsets into the window: `0x0000..0x8000` for program
/// space (CPU $8000-$FFFF) and `0x0000..0x2000` for character space.
/// Reads take `&self` so a debugger can inspect without side effects;
/// bank-switch registers live behind the write methods.
pub trait Mapper {
    fn program_read(&self, addr: u16) -> u8;
    fn program_write(&mut self, addr: u16, value: u8);
    fn character_read(&self, addr: u16) -> u8;
    fn character_write(&mut self, addr: u16, value: u8);
}

/// Build the mapper a header asks for.
pub(crate) fn create(
    name: &str,
    header: &Header,
    prg: &Arc<[u8]>,
    chr: &Arc<[u8]>,
) -> Result<Box<dyn Mapper>, CartridgeError> {
    match header.mapper_number {
        0 => Ok(Box::new(Nrom::new(Arc::clone(prg), Arc::clone(chr)))),
        number => Err(CartridgeError::UnsupportedMapper {
            name: name.to_owned(),
            number,
        }),
    }
}
