use core::fmt::Write;

use heapless::String;

use super::{
    melody::MelodySource,
    note::{ControlSection, Note},
    AudioError,
};

pub const CONTROL_TEXT_LEN: usize = 24;

pub fn write_control<W: Write>(w: &mut W, control: &ControlSection) -> core::fmt::Result {
    write!(
        w,
        "d={},o={},b={}:",
        control.duration, control.octave, control.bpm
    )
}

/// Writes one note in text form. Duration and octave are left out when they
/// match the control section, the parser fills them back in.
pub fn write_note<W: Write>(
    w: &mut W,
    note: &Note,
    control: &ControlSection,
) -> core::fmt::Result {
    if note.duration != control.duration {
        write!(w, "{}", note.duration)?;
    }

    w.write_char(note.letter.to_ascii() as char)?;

    if note.sharp && !note.is_rest() {
        w.write_char('#')?;
    }

    if note.dotted {
        w.write_char('.')?;
    }

    if note.octave != control.octave {
        write!(w, "{}", note.octave)?;
    }

    Ok(())
}

/// Renders a whole melody back to RTTTL text, returns the number of notes.
/// `name` overrides the melody's own name, packed melodies don't carry one.
pub fn write_melody<W: Write, M: MelodySource>(
    w: &mut W,
    melody: &mut M,
    name: Option<&str>,
) -> Result<usize, AudioError> {
    let control = melody.read_control()?;

    w.write_str(name.unwrap_or(melody.name()))
        .map_err(|_| AudioError::BufferFull)?;
    w.write_char(':').map_err(|_| AudioError::BufferFull)?;
    write_control(w, &control).map_err(|_| AudioError::BufferFull)?;

    let mut notes = 0;
    while let Some(note) = melody.next_note(&control) {
        if notes > 0 {
            w.write_char(',').map_err(|_| AudioError::BufferFull)?;
        }
        write_note(w, &note, &control).map_err(|_| AudioError::BufferFull)?;
        notes += 1;
    }

    Ok(notes)
}

pub fn render_control(control: &ControlSection) -> Result<String<CONTROL_TEXT_LEN>, AudioError> {
    let mut text = String::new();
    write_control(&mut text, control).map_err(|_| AudioError::BufferFull)?;
    Ok(text)
}

pub fn render_note<const N: usize>(
    note: &Note,
    control: &ControlSection,
) -> Result<String<N>, AudioError> {
    let mut text = String::new();
    write_note(&mut text, note, control).map_err(|_| AudioError::BufferFull)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{
        melody::{Packed16Melody, TextMelody},
        note::NoteLetter,
        songs,
    };

    #[test]
    fn control_text() {
        let control = ControlSection::unpack(0x140A);
        assert_eq!(render_control(&control).unwrap().as_str(), "d=4,o=5,b=160:");
    }

    #[test]
    fn notes_drop_defaults() {
        let control = ControlSection::new(4, 5, 160);

        let text: String<8> = render_note(&Note::new(4, NoteLetter::E, 6), &control).unwrap();
        assert_eq!(text.as_str(), "e6");

        let text: String<8> = render_note(&Note::new(8, NoteLetter::B, 5), &control).unwrap();
        assert_eq!(text.as_str(), "8b");

        let note = Note::new(16, NoteLetter::C, 7).sharp().dotted();
        let text: String<8> = render_note(&note, &control).unwrap();
        assert_eq!(text.as_str(), "16c#.7");

        let text: String<8> = render_note(&Note::rest(2, 5).sharp(), &control).unwrap();
        assert_eq!(text.as_str(), "2p");
    }

    #[test]
    fn text_round_trip() {
        let mut text = String::<512>::new();
        let notes = write_melody(&mut text, &mut TextMelody::from_text(songs::TETRIS), None).unwrap();
        assert_eq!(notes, songs::TETRIS_NOTE_COUNT);
        assert_eq!(text.as_str(), songs::TETRIS);
    }

    #[test]
    fn packed_melody_renders_as_text() {
        let mut text = String::<512>::new();
        let mut melody = Packed16Melody::from_bytes(&songs::TETRIS_16BIT);
        write_melody(&mut text, &mut melody, Some("tetris")).unwrap();
        assert_eq!(text.as_str(), songs::TETRIS);
    }

    #[test]
    fn small_buffer_is_full() {
        let mut text = String::<16>::new();
        assert_eq!(
            write_melody(&mut text, &mut TextMelody::from_text(songs::TETRIS), None),
            Err(AudioError::BufferFull)
        );
    }
}
