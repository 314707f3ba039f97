// Melody format defaults
// these apply when a text melody leaves a field out of its control section
pub const DEFAULT_DURATION: u16 = 4;
pub const DEFAULT_OCTAVE: u8 = 6;
pub const DEFAULT_BPM: u16 = 63;

// header octaves are accepted in this range, per note any single digit is
pub const HEADER_OCTAVE_MIN: u8 = 3;
pub const HEADER_OCTAVE_MAX: u8 = 7;

// melody names longer than this are truncated
pub const MELODY_NAME_LEN: usize = 10;

// bpm is stored raw in 10 bits in the packed control section
pub const MAX_PACKED_BPM: u16 = 1023;

// extra hold after a sounding note before the next one starts
pub const NOTE_GAP_MS: u32 = 1;

// sleep between ticks in blocking playback
pub const BLOCKING_YIELD_MS: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderParsing {
    // d, o, b in that order, separated by commas
    #[default]
    Strict,
    // fields in any order, anything in between is skipped
    Relaxed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerConfig {
    pub note_gap_ms: u32,
    pub yield_ms: u32,
}

impl PlayerConfig {
    pub const fn new() -> Self {
        Self {
            note_gap_ms: NOTE_GAP_MS,
            yield_ms: BLOCKING_YIELD_MS,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
