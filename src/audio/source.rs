// Byte level access to a melody buffer.
//
// The text parser and the 16 bit codec only ever peek, read and skip, so
// they are written once against `ByteSource` and work the same over RAM
// and read-only memory. A 0 byte (or running off the end) means end of input.

pub trait ByteSource {
    fn peek(&self) -> u8;

    fn read(&mut self) -> u8;

    fn skip(&mut self, count: usize);

    fn is_exhausted(&self) -> bool {
        self.peek() == 0
    }
}

pub struct RamSource<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> RamSource<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> From<&'a str> for RamSource<'a> {
    fn from(value: &'a str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for RamSource<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::new(value)
    }
}

impl ByteSource for RamSource<'_> {
    fn peek(&self) -> u8 {
        self.buffer.get(self.pos).copied().unwrap_or(0)
    }

    fn read(&mut self) -> u8 {
        let byte = self.peek();
        if self.pos < self.buffer.len() {
            self.pos += 1;
        }

        byte
    }

    fn skip(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.buffer.len());
    }
}

/// Platform read primitive for memory that can't be dereferenced directly
/// (program flash on harvard parts, external flash, ...).
pub trait ReadOnlyMemory {
    // None past the end of the region
    fn read_byte(&self, offset: usize) -> Option<u8>;
}

impl ReadOnlyMemory for [u8] {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.get(offset).copied()
    }
}

impl<const N: usize> ReadOnlyMemory for [u8; N] {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.get(offset).copied()
    }
}

/// Wraps a `Fn(offset) -> Option<u8>` read routine as a memory region.
pub struct MemoryFn<F>(pub F);

impl<F: Fn(usize) -> Option<u8>> ReadOnlyMemory for MemoryFn<F> {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        (self.0)(offset)
    }
}

pub struct FlashSource<'a, M: ReadOnlyMemory + ?Sized> {
    memory: &'a M,
    pos: usize,
}

impl<'a, M: ReadOnlyMemory + ?Sized> FlashSource<'a, M> {
    pub const fn new(memory: &'a M) -> Self {
        Self { memory, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<M: ReadOnlyMemory + ?Sized> ByteSource for FlashSource<'_, M> {
    fn peek(&self) -> u8 {
        self.memory.read_byte(self.pos).unwrap_or(0)
    }

    fn read(&mut self) -> u8 {
        match self.memory.read_byte(self.pos) {
            Some(byte) => {
                self.pos += 1;
                byte
            }
            None => 0,
        }
    }

    fn skip(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count);
    }
}
