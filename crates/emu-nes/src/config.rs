//! NES configuration.

/// Everything needed to power on a [`crate::Nes`].
#[derive(Debug, Clone, Default)]
pub struct NesConfig {
    /// iNES file contents.
    pub rom_data: Vec<u8>,
    /// Label used in logs and load errors, usually the file name.
    pub rom_name: String,
    /// Start here instead of at the reset vector. The reset sequence still
    /// runs first, so registers and cycle count match a cold boot.
    pub entry_point: Option<u16>,
}

impl NesConfig {
    #[must_use]
    pub fn new(rom_data: Vec<u8>, rom_name: impl Into<String>) -> Self {
        Self {
            rom_data,
            rom_name: rom_name.into(),
            entry_point: None,
        }
    }

    #[must_use]
    pub fn with_entry_point(mut self, pc: u16) -> Self {
        self.entry_point = Some(pc);
        self
    }
}
