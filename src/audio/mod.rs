pub mod bits;
pub mod binary;
pub mod melody;
pub mod note;
pub mod render;
pub mod songs;
pub mod source;
pub mod tables;
pub mod text;
pub mod tone_player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    UnplayablePitch,
    // the melody name was never terminated by ':'
    MissingControlSection,
    // bpm of 0, the whole note length would divide by zero
    InvalidBpm,
    UnsupportedDuration,
    UnsupportedOctave,
    UnsupportedBpm,
    BufferFull,
}
