#![cfg_attr(not(test), no_std)]

pub(crate) mod fmt;

pub mod audio;
pub mod config;
pub mod drivers;
pub mod time;

pub use audio::AudioError;
pub use audio::binary::{encode_10bits, encode_16bits, EncodedMelody};
pub use audio::bits::{BitProvider, BitReader, BitWriter};
pub use audio::melody::{MelodySource, Packed10Melody, Packed16Melody, TextMelody};
pub use audio::note::{ControlSection, Note, NoteEvent, NoteLetter};
pub use audio::render::{render_control, write_melody};
pub use audio::source::{ByteSource, FlashSource, RamSource};
pub use audio::tone_player::{PlayerState, TonePlayer};
pub use config::{HeaderParsing, PlayerConfig};
pub use drivers::audio::{bounded::BoundedTone, PlayTone, ToneFns};
pub use time::{Clock, FnClock};
