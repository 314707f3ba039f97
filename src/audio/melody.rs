use heapless::String;

use crate::config::{HeaderParsing, MELODY_NAME_LEN};

use super::{
    binary::{CONTROL_SECTION_BITS, PACKED_NOTE_BITS},
    bits::{BitProvider, BitReader},
    note::{ControlSection, Note},
    source::{ByteSource, RamSource},
    text, AudioError,
};

/// A melody the player can walk one note at a time, whatever its storage
/// format. The control section is always read first.
pub trait MelodySource {
    fn read_control(&mut self) -> Result<ControlSection, AudioError>;

    fn next_note(&mut self, control: &ControlSection) -> Option<Note>;

    fn is_exhausted(&mut self) -> bool;

    fn skip_to_end(&mut self);

    fn name(&self) -> &str {
        ""
    }
}

pub struct TextMelody<S: ByteSource> {
    source: S,
    parsing: HeaderParsing,
    name: String<MELODY_NAME_LEN>,
}

impl<S: ByteSource> TextMelody<S> {
    pub fn new(source: S) -> Self {
        Self::new_with_parsing(source, HeaderParsing::default())
    }

    pub fn new_with_parsing(source: S, parsing: HeaderParsing) -> Self {
        Self {
            source,
            parsing,
            name: String::new(),
        }
    }

    pub fn parsing(&self) -> HeaderParsing {
        self.parsing
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<'a> TextMelody<RamSource<'a>> {
    pub fn from_text(text: &'a str) -> Self {
        Self::new(RamSource::from(text))
    }

    pub fn from_text_relaxed(text: &'a str) -> Self {
        Self::new_with_parsing(RamSource::from(text), HeaderParsing::Relaxed)
    }
}

impl<S: ByteSource> MelodySource for TextMelody<S> {
    fn read_control(&mut self) -> Result<ControlSection, AudioError> {
        self.name.clear();
        text::read_name(&mut self.source, &mut self.name)?;
        Ok(text::parse_control(&mut self.source, self.parsing))
    }

    fn next_note(&mut self, control: &ControlSection) -> Option<Note> {
        if self.is_exhausted() {
            return None;
        }

        Some(text::parse_note(&mut self.source, control, self.parsing))
    }

    fn is_exhausted(&mut self) -> bool {
        if self.parsing == HeaderParsing::Relaxed {
            while self.source.peek().is_ascii_whitespace() {
                self.source.skip(1);
            }
        }

        self.source.is_exhausted()
    }

    fn skip_to_end(&mut self) {
        while !self.source.is_exhausted() {
            self.source.skip(1);
        }
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Control section word followed by one little endian 16 bit word per note.
/// Binary data has no terminator, the note count bounds the stream.
pub struct Packed16Melody<S: ByteSource> {
    source: S,
    remaining: usize,
}

impl<S: ByteSource> Packed16Melody<S> {
    pub fn new(source: S, note_count: usize) -> Self {
        Self {
            source,
            remaining: note_count,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn read_word(&mut self) -> u16 {
        let lo = self.source.read();
        let hi = self.source.read();
        u16::from_le_bytes([lo, hi])
    }
}

impl<'a> Packed16Melody<RamSource<'a>> {
    // note count is whatever fits after the control section
    pub fn from_bytes(buffer: &'a [u8]) -> Self {
        Self::new(RamSource::new(buffer), buffer.len().saturating_sub(2) / 2)
    }
}

impl<S: ByteSource> MelodySource for Packed16Melody<S> {
    fn read_control(&mut self) -> Result<ControlSection, AudioError> {
        Ok(ControlSection::unpack(self.read_word()))
    }

    fn next_note(&mut self, control: &ControlSection) -> Option<Note> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(Note::unpack(self.read_word(), control))
    }

    fn is_exhausted(&mut self) -> bool {
        self.remaining == 0
    }

    fn skip_to_end(&mut self) {
        self.source.skip(self.remaining.saturating_mul(2));
        self.remaining = 0;
    }
}

/// Control section in 16 bits, then 10 bits per note with no padding,
/// pulled through a bit provider.
pub struct Packed10Melody<B: BitProvider> {
    bits: B,
    remaining: usize,
}

impl<B: BitProvider> Packed10Melody<B> {
    pub fn new(bits: B, note_count: usize) -> Self {
        Self {
            bits,
            remaining: note_count,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<'a> Packed10Melody<BitReader<'a>> {
    pub fn from_bytes(buffer: &'a [u8], note_count: usize) -> Self {
        Self::new(BitReader::new(buffer), note_count)
    }
}

impl<B: BitProvider> MelodySource for Packed10Melody<B> {
    fn read_control(&mut self) -> Result<ControlSection, AudioError> {
        Ok(ControlSection::unpack(self.bits.read_bits(CONTROL_SECTION_BITS)))
    }

    fn next_note(&mut self, control: &ControlSection) -> Option<Note> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(Note::unpack(self.bits.read_bits(PACKED_NOTE_BITS), control))
    }

    fn is_exhausted(&mut self) -> bool {
        self.remaining == 0
    }

    fn skip_to_end(&mut self) {
        // a provider can't seek, drain it so the caller's cursor ends up past the melody
        while self.remaining > 0 {
            self.bits.read_bits(PACKED_NOTE_BITS);
            self.remaining -= 1;
        }
    }
}
