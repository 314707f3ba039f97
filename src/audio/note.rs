use crate::config::{DEFAULT_BPM, DEFAULT_DURATION, DEFAULT_OCTAVE};

use super::tables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
    Pause,
}

impl NoteLetter {
    pub fn from_ascii(letter: u8) -> Option<Self> {
        tables::find_note_letter_index(letter).and_then(|ind| Self::try_from(ind).ok())
    }

    pub fn to_ascii(self) -> u8 {
        tables::NOTE_LETTERS[self.index() as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    // semitone offset within the octave, 0 for a pause
    pub fn offset(self) -> u8 {
        tables::NOTE_OFFSETS[self.index() as usize]
    }
}

impl TryFrom<u8> for NoteLetter {
    type Error = ();

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(Self::C),
            1 => Ok(Self::D),
            2 => Ok(Self::E),
            3 => Ok(Self::F),
            4 => Ok(Self::G),
            5 => Ok(Self::A),
            6 => Ok(Self::B),
            7 => Ok(Self::Pause),
            _ => Err(()),
        }
    }
}

/// Melody wide values from the control section (`d=4,o=5,b=160:`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSection {
    pub duration: u16,
    pub octave: u8,
    pub bpm: u16,
}

impl ControlSection {
    pub const fn new(duration: u16, octave: u8, bpm: u16) -> Self {
        Self {
            duration,
            octave,
            bpm,
        }
    }

    /// Length of a whole note in ms. Bpm counts quarter notes per minute.
    pub fn whole_note_ms(&self) -> Option<u32> {
        if self.bpm == 0 {
            return None;
        }

        Some(60_000 / self.bpm as u32 * 4)
    }
}

impl Default for ControlSection {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, DEFAULT_OCTAVE, DEFAULT_BPM)
    }
}

/// A decoded note with every default already resolved against the control
/// section. Both the text parser and the packed codecs produce these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub duration: u16,
    pub letter: NoteLetter,
    pub sharp: bool,
    pub dotted: bool,
    pub octave: u8,
}

impl Note {
    pub const fn new(duration: u16, letter: NoteLetter, octave: u8) -> Self {
        Self {
            duration,
            letter,
            sharp: false,
            dotted: false,
            octave,
        }
    }

    pub const fn rest(duration: u16, octave: u8) -> Self {
        Self::new(duration, NoteLetter::Pause, octave)
    }

    pub const fn sharp(mut self) -> Self {
        self.sharp = true;
        self
    }

    pub const fn dotted(mut self) -> Self {
        self.dotted = true;
        self
    }

    pub fn is_rest(&self) -> bool {
        self.letter == NoteLetter::Pause
    }

    pub fn duration_ms(&self, whole_note_ms: u32) -> u32 {
        let mut duration_ms = whole_note_ms / self.duration.max(1) as u32;
        if self.dotted {
            duration_ms += duration_ms / 2;
        }

        duration_ms
    }

    pub fn to_event(&self, whole_note_ms: u32) -> NoteEvent {
        NoteEvent {
            duration_ms: self.duration_ms(whole_note_ms),
            letter_offset: self.letter.offset(),
            sharp: self.sharp && !self.is_rest(),
            dotted: self.dotted,
            octave: self.octave,
        }
    }
}

/// One timed step of playback, lives for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteEvent {
    pub duration_ms: u32,
    pub letter_offset: u8,
    pub sharp: bool,
    pub dotted: bool,
    pub octave: u8,
}

impl NoteEvent {
    pub fn is_rest(&self) -> bool {
        self.letter_offset == 0
    }

    pub fn semitone(&self) -> u8 {
        if self.is_rest() {
            0
        } else {
            self.letter_offset + self.sharp as u8
        }
    }

    // None for rests and for notes outside the pitch table, both play as silence
    pub fn frequency(&self) -> Option<u16> {
        tables::pitch(self.octave, self.semitone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_both_ways() {
        assert_eq!(NoteLetter::from_ascii(b'e'), Some(NoteLetter::E));
        assert_eq!(NoteLetter::from_ascii(b'p'), Some(NoteLetter::Pause));
        assert_eq!(NoteLetter::from_ascii(b'x'), None);
        assert_eq!(NoteLetter::B.to_ascii(), b'b');
        assert_eq!(NoteLetter::E.offset(), 5);
        assert_eq!(NoteLetter::B.offset(), 12);
        assert_eq!(NoteLetter::Pause.offset(), 0);
        assert_eq!(NoteLetter::try_from(8), Err(()));
    }

    #[test]
    fn whole_note_from_bpm() {
        assert_eq!(ControlSection::new(4, 5, 160).whole_note_ms(), Some(1500));
        assert_eq!(ControlSection::default().whole_note_ms(), Some(3808));
        assert_eq!(ControlSection::new(4, 5, 0).whole_note_ms(), None);
    }

    #[test]
    fn durations() {
        let note = Note::new(8, NoteLetter::B, 5);
        assert_eq!(note.duration_ms(1500), 187);
        assert_eq!(note.dotted().duration_ms(1500), 280);
        assert_eq!(Note::new(4, NoteLetter::E, 6).duration_ms(1500), 375);
    }

    #[test]
    fn events() {
        let event = Note::new(4, NoteLetter::E, 6).to_event(1500);
        assert_eq!(event.frequency(), Some(1319));

        let event = Note::new(4, NoteLetter::C, 5).sharp().to_event(1500);
        assert_eq!(event.semitone(), 2);
        assert_eq!(event.frequency(), Some(554));

        // sharp on a rest is dropped
        let event = Note::rest(4, 5).sharp().to_event(1500);
        assert!(event.is_rest());
        assert_eq!(event.frequency(), None);

        let event = Note::new(4, NoteLetter::A, 9).to_event(1500);
        assert_eq!(event.frequency(), None);
    }
}
