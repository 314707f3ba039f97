use super::AudioError;

const BITS_PER_BYTE: u8 = 8;

// Bits are stored least significant first: bit 0 of a field lands at the
// current cursor, bit 1 right after it and so on across byte boundaries.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitAddress {
    pub byte: usize,
    pub bit: u8,
}

impl BitAddress {
    pub fn add(&mut self, bits: usize) {
        let bit = self.bit as usize + bits % BITS_PER_BYTE as usize;
        self.byte += bits / BITS_PER_BYTE as usize + bit / BITS_PER_BYTE as usize;
        self.bit = (bit % BITS_PER_BYTE as usize) as u8;
    }

    pub fn next(&mut self) {
        self.add(1);
    }
}

/// Anything that hands out up to 16 bits at a time, a `BitReader` or a
/// caller supplied `FnMut(num_bits) -> bits`.
pub trait BitProvider {
    fn read_bits(&mut self, count: u8) -> u16;
}

impl<F: FnMut(u8) -> u16> BitProvider for F {
    fn read_bits(&mut self, count: u8) -> u16 {
        self(count)
    }
}

pub struct BitReader<'a> {
    buffer: &'a [u8],
    addr: BitAddress,
}

impl<'a> BitReader<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            addr: BitAddress { byte: 0, bit: 0 },
        }
    }

    pub fn address(&self) -> BitAddress {
        self.addr
    }

    fn get_bit(&self) -> u16 {
        // past the end reads as zeroes, the caller's note count is the real bound
        self.buffer
            .get(self.addr.byte)
            .map(|byte| ((byte >> self.addr.bit) & 1) as u16)
            .unwrap_or(0)
    }

    pub fn read(&mut self, count: u8) -> u16 {
        let count = count.min(16);

        let mut bits = 0_u16;
        for i in 0..count {
            bits |= self.get_bit() << i;
            self.addr.next();
        }

        bits
    }
}

impl BitProvider for BitReader<'_> {
    fn read_bits(&mut self, count: u8) -> u16 {
        self.read(count)
    }
}

pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    addr: BitAddress,
}

impl<'a> BitWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            addr: BitAddress::default(),
        }
    }

    pub fn address(&self) -> BitAddress {
        self.addr
    }

    // bytes touched so far, a partially filled last byte counts
    pub fn bytes_written(&self) -> usize {
        self.addr.byte + (self.addr.bit > 0) as usize
    }

    pub fn write(&mut self, bits: u16, count: u8) -> Result<(), AudioError> {
        let count = count.min(16);

        let mut end = self.addr;
        end.add(count as usize);
        let needed = end.byte + (end.bit > 0) as usize;
        if needed > self.buffer.len() {
            return Err(AudioError::BufferFull);
        }

        for i in 0..count {
            let mask = 1 << self.addr.bit;
            let byte = &mut self.buffer[self.addr.byte];
            if (bits >> i) & 1 == 1 {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
            self.addr.next();
        }

        Ok(())
    }
}
