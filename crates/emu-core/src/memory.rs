//! Backing stores that sit behind an address map.
//!
//! A [`Memory`] is addressed by offset from the start of the region it is
//! mapped into, not by absolute bus address. The address map does the
//! translation; the store only ever sees `0..len()`.

/// A byte-addressable backing store.
pub trait Memory {
    /// Read the byte at `offset`. May have device side effects.
    fn read(&mut self, offset: usize) -> u8;

    /// Write the byte at `offset`.
    fn write(&mut self, offset: usize, value: u8);

    /// Read the byte at `offset` without side effects.
    fn peek(&self, offset: usize) -> u8;

    /// Declared size in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short label for diagnostics.
    fn name(&self) -> &str;
}

/// Plain read/write storage.
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    name: &'static str,
    data: Vec<u8>,
}

impl MemoryBlock {
    /// Zero-filled block of `len` bytes.
    #[must_use]
    pub fn new(name: &'static str, len: usize) -> Self {
        Self {
            name,
            data: vec![0; len],
        }
    }

    /// Block initialised from existing bytes.
    #[must_use]
    pub fn with_data(name: &'static str, data: Vec<u8>) -> Self {
        Self { name, data }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Memory for MemoryBlock {
    fn read(&mut self, offset: usize) -> u8 {
        self.peek(offset)
    }

    fn write(&mut self, offset: usize, value: u8) {
        if let Some(byte) = self.data.get_mut(offset) {
            *byte = value;
        }
    }

    fn peek(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// A store repeated across a larger window.
///
/// Every offset is reduced modulo the inner store's length before it is
/// delegated, so a 2 KB RAM mapped over 8 KB answers at four aliases.
#[derive(Debug, Clone)]
pub struct Mirrored<M> {
    inner: M,
}

impl<M: Memory> Mirrored<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    fn wrap(&self, offset: usize) -> usize {
        offset % self.inner.len().max(1)
    }
}

impl<M: Memory> Memory for Mirrored<M> {
    fn read(&mut self, offset: usize) -> u8 {
        let offset = self.wrap(offset);
        self.inner.read(offset)
    }

    fn write(&mut self, offset: usize, value: u8) {
        let offset = self.wrap(offset);
        self.inner.write(offset, value);
    }

    fn peek(&self, offset: usize) -> u8 {
        self.inner.peek(self.wrap(offset))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_reduces_modulo_length() {
        let mut ram = Mirrored::new(MemoryBlock::new("ram", 0x800));
        ram.write(0x0801, 0x5A);
        assert_eq!(ram.read(0x0001), 0x5A);
        assert_eq!(ram.peek(0x1801), 0x5A);
        assert_eq!(ram.inner().as_slice()[1], 0x5A);
    }

    #[test]
    fn block_out_of_range_reads_zero() {
        let mut block = MemoryBlock::with_data("rom", vec![1, 2]);
        block.write(5, 9);
        assert_eq!(block.read(5), 0);
        assert_eq!(block.len(), 2);
        assert!(!block.is_empty());
    }
}
