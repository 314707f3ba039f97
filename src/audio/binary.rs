// Packed melody layouts, least significant bit first.
//
// control section, 16 bits:
//   [0..3)  duration index
//   [3..5)  octave index
//   [5..15) bpm, raw value
//   [15]    padding
//
// note, 10 meaningful bits (padded to 16 in the word aligned format):
//   [0..3)  duration index, 0b111 means "use the control section duration"
//   [3..6)  note letter index
//   [6]     sharp
//   [7]     dotted
//   [8..10) octave index

use heapless::Vec;

use crate::config::{DEFAULT_DURATION, MAX_PACKED_BPM};

use super::{
    bits::BitWriter,
    melody::MelodySource,
    note::{ControlSection, Note, NoteLetter},
    tables, AudioError,
};

pub const CONTROL_SECTION_BITS: u8 = 16;
pub const PACKED_NOTE_BITS: u8 = 10;

pub const DURATION_USE_DEFAULT: u8 = 0b111;

const DURATION_MASK: u16 = 0b111;
const LETTER_SHIFT: u16 = 3;
const LETTER_MASK: u16 = 0b111;
const SHARP_BIT: u16 = 6;
const DOTTED_BIT: u16 = 7;
const NOTE_OCTAVE_SHIFT: u16 = 8;
const CONTROL_OCTAVE_SHIFT: u16 = 3;
const OCTAVE_MASK: u16 = 0b11;
const BPM_SHIFT: u16 = 5;
const BPM_MASK: u16 = 0x3FF;

impl ControlSection {
    pub fn pack(&self) -> Result<u16, AudioError> {
        let duration_ind =
            tables::find_duration_index(self.duration).ok_or(AudioError::UnsupportedDuration)?;
        let octave_ind =
            tables::find_octave_index(self.octave).ok_or(AudioError::UnsupportedOctave)?;
        if self.bpm == 0 || self.bpm > MAX_PACKED_BPM {
            return Err(AudioError::UnsupportedBpm);
        }

        Ok(duration_ind as u16
            | (octave_ind as u16) << CONTROL_OCTAVE_SHIFT
            | self.bpm << BPM_SHIFT)
    }

    pub fn unpack(raw: u16) -> Self {
        let duration = tables::duration_from_index((raw & DURATION_MASK) as u8)
            .unwrap_or(DEFAULT_DURATION);
        let octave_ind = ((raw >> CONTROL_OCTAVE_SHIFT) & OCTAVE_MASK) as u8;
        // two bits always land in the octave table
        let octave = tables::NOTE_OCTAVES[octave_ind as usize];
        let bpm = (raw >> BPM_SHIFT) & BPM_MASK;

        Self::new(duration, octave, bpm)
    }
}

impl Note {
    pub fn pack(&self) -> Result<u16, AudioError> {
        let duration_ind =
            tables::find_duration_index(self.duration).ok_or(AudioError::UnsupportedDuration)?;
        let octave_ind = match tables::find_octave_index(self.octave) {
            Some(ind) => ind,
            // a pause never looks at its octave
            None if self.is_rest() => 0,
            None => return Err(AudioError::UnsupportedOctave),
        };

        Ok(duration_ind as u16
            | (self.letter.index() as u16) << LETTER_SHIFT
            | ((self.sharp && !self.is_rest()) as u16) << SHARP_BIT
            | (self.dotted as u16) << DOTTED_BIT
            | (octave_ind as u16) << NOTE_OCTAVE_SHIFT)
    }

    pub fn unpack(raw: u16, control: &ControlSection) -> Self {
        let octave_ind = ((raw >> NOTE_OCTAVE_SHIFT) & OCTAVE_MASK) as u8;
        let octave = tables::NOTE_OCTAVES[octave_ind as usize];
        let letter = NoteLetter::try_from(((raw >> LETTER_SHIFT) & LETTER_MASK) as u8)
            .unwrap_or(NoteLetter::Pause);

        let duration_ind = (raw & DURATION_MASK) as u8;
        let duration = if duration_ind == DURATION_USE_DEFAULT {
            control.duration
        } else {
            match tables::duration_from_index(duration_ind) {
                Some(duration) => duration,
                // unknown duration index, play it as a pause rather than guess
                None => return Note::rest(control.duration, octave),
            }
        };

        let mut note = Note::new(duration, letter, octave);
        note.sharp = (raw >> SHARP_BIT) & 1 == 1 && !note.is_rest();
        note.dotted = (raw >> DOTTED_BIT) & 1 == 1;
        note
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedMelody {
    pub bytes: usize,
    pub notes: usize,
}

fn push_word(out: &mut [u8], pos: &mut usize, word: u16) -> Result<(), AudioError> {
    let dst = out
        .get_mut(*pos..*pos + 2)
        .ok_or(AudioError::BufferFull)?;
    dst.copy_from_slice(&word.to_le_bytes());
    *pos += 2;

    Ok(())
}

/// Re-encodes a melody as one 16 bit word per note into `out`.
pub fn encode_16bits<M: MelodySource>(
    melody: &mut M,
    out: &mut [u8],
) -> Result<EncodedMelody, AudioError> {
    let control = melody.read_control()?;

    let mut bytes = 0;
    push_word(out, &mut bytes, control.pack()?)?;

    let mut notes = 0;
    while let Some(note) = melody.next_note(&control) {
        push_word(out, &mut bytes, note.pack()?)?;
        notes += 1;
    }

    Ok(EncodedMelody { bytes, notes })
}

/// Re-encodes a melody as 10 bits per note into `out`, the last byte is
/// zero padded.
pub fn encode_10bits<M: MelodySource>(
    melody: &mut M,
    out: &mut [u8],
) -> Result<EncodedMelody, AudioError> {
    let control = melody.read_control()?;

    let mut writer = BitWriter::new(out);
    writer.write(control.pack()?, CONTROL_SECTION_BITS)?;

    let mut notes = 0;
    while let Some(note) = melody.next_note(&control) {
        writer.write(note.pack()?, PACKED_NOTE_BITS)?;
        notes += 1;
    }

    let padding = (8 - writer.address().bit) % 8;
    writer.write(0, padding)?;

    Ok(EncodedMelody {
        bytes: writer.bytes_written(),
        notes,
    })
}

pub fn encode_16bits_vec<M: MelodySource, const N: usize>(
    melody: &mut M,
) -> Result<(Vec<u8, N>, usize), AudioError> {
    let mut out = Vec::new();
    out.resize(N, 0).map_err(|_| AudioError::BufferFull)?;
    let encoded = encode_16bits(melody, &mut out)?;
    out.truncate(encoded.bytes);

    Ok((out, encoded.notes))
}

pub fn encode_10bits_vec<M: MelodySource, const N: usize>(
    melody: &mut M,
) -> Result<(Vec<u8, N>, usize), AudioError> {
    let mut out = Vec::new();
    out.resize(N, 0).map_err(|_| AudioError::BufferFull)?;
    let encoded = encode_10bits(melody, &mut out)?;
    out.truncate(encoded.bytes);

    Ok((out, encoded.notes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_section_layout() {
        let control = ControlSection::new(4, 5, 160);
        assert_eq!(control.pack(), Ok(0x140A));
        assert_eq!(ControlSection::unpack(0x140A), control);
    }

    #[test]
    fn control_section_limits() {
        assert_eq!(
            ControlSection::new(3, 5, 160).pack(),
            Err(AudioError::UnsupportedDuration)
        );
        assert_eq!(
            ControlSection::new(4, 3, 160).pack(),
            Err(AudioError::UnsupportedOctave)
        );
        assert_eq!(
            ControlSection::new(4, 5, 0).pack(),
            Err(AudioError::UnsupportedBpm)
        );
        assert_eq!(
            ControlSection::new(4, 5, 1024).pack(),
            Err(AudioError::UnsupportedBpm)
        );
        assert!(ControlSection::new(32, 7, 1023).pack().is_ok());

        // reserved duration indices fall back to the default
        assert_eq!(ControlSection::unpack(0x0007).duration, DEFAULT_DURATION);
    }

    #[test]
    fn note_layout() {
        let control = ControlSection::new(4, 5, 160);

        let e6 = Note::new(4, NoteLetter::E, 6);
        assert_eq!(e6.pack(), Ok(0x0212));
        assert_eq!(Note::unpack(0x0212, &control), e6);

        let note = Note::new(16, NoteLetter::F, 7).sharp().dotted();
        let raw = note.pack().unwrap();
        assert_eq!(raw, 0x4 | 3 << 3 | 1 << 6 | 1 << 7 | 3 << 8);
        assert_eq!(Note::unpack(raw, &control), note);
    }

    #[test]
    fn note_pack_limits() {
        assert_eq!(
            Note::new(3, NoteLetter::C, 5).pack(),
            Err(AudioError::UnsupportedDuration)
        );
        assert_eq!(
            Note::new(4, NoteLetter::C, 8).pack(),
            Err(AudioError::UnsupportedOctave)
        );
        // pauses don't care about the octave
        assert_eq!(Note::rest(4, 3).pack(), Ok(0x0002 | 7 << 3));
    }

    #[test]
    fn note_duration_patterns() {
        let control = ControlSection::new(8, 5, 160);

        let note = Note::unpack(DURATION_USE_DEFAULT as u16 | 1 << 3, &control);
        assert_eq!(note, Note::new(8, NoteLetter::D, 4));

        // index 6 isn't in the table
        let note = Note::unpack(6 | 1 << 3, &control);
        assert_eq!(note, Note::rest(8, 4));
    }

    #[test]
    fn every_valid_note_round_trips() {
        let control = ControlSection::default();
        for duration in tables::NOTE_DURATIONS {
            for letter_ind in 0..8 {
                for octave in tables::NOTE_OCTAVES {
                    let letter = NoteLetter::try_from(letter_ind).unwrap();
                    let mut note = Note::new(duration, letter, octave).dotted();
                    note.sharp = !note.is_rest();
                    let raw = note.pack().unwrap();
                    assert!(raw < 1 << PACKED_NOTE_BITS);
                    assert_eq!(Note::unpack(raw, &control), note);
                }
            }
        }
    }
}
