use heapless::String;

use crate::config::{HeaderParsing, HEADER_OCTAVE_MAX, HEADER_OCTAVE_MIN};

use super::{
    note::{ControlSection, Note, NoteLetter},
    source::ByteSource,
    tables,
    AudioError,
};

// format: name:d=N,o=N,b=NNN:note,note,...
// note:   [duration]letter[#][.][octave]

pub fn read_integer<S: ByteSource>(src: &mut S) -> u32 {
    let mut value: u32 = 0;

    while src.peek().is_ascii_digit() {
        let digit = (src.read() - b'0') as u32;
        value = value.saturating_mul(10).saturating_add(digit);
    }

    value
}

fn skip_if<S: ByteSource>(src: &mut S, expected: u8) -> bool {
    if src.peek() == expected {
        src.skip(1);
        true
    } else {
        false
    }
}

fn skip_whitespace<S: ByteSource>(src: &mut S) {
    while src.peek().is_ascii_whitespace() {
        src.skip(1);
    }
}

fn accept_duration(value: u32) -> Option<u16> {
    let duration = u16::try_from(value).ok()?;
    tables::find_duration_index(duration).map(|_| duration)
}

fn accept_header_octave(value: u32) -> Option<u8> {
    let octave = u8::try_from(value).ok()?;
    (HEADER_OCTAVE_MIN..=HEADER_OCTAVE_MAX)
        .contains(&octave)
        .then_some(octave)
}

fn accept_bpm(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Consumes the melody name and the ':' after it. Names longer than the
/// buffer are truncated, the scan itself always runs to the ':'.
pub fn read_name<S: ByteSource, const N: usize>(
    src: &mut S,
    name: &mut String<N>,
) -> Result<(), AudioError> {
    loop {
        match src.read() {
            0 => return Err(AudioError::MissingControlSection),
            b':' => return Ok(()),
            byte => {
                let _ = name.push(byte as char);
            }
        }
    }
}

pub fn parse_control<S: ByteSource>(src: &mut S, parsing: HeaderParsing) -> ControlSection {
    match parsing {
        HeaderParsing::Strict => parse_control_strict(src),
        HeaderParsing::Relaxed => parse_control_relaxed(src),
    }
}

fn parse_control_strict<S: ByteSource>(src: &mut S) -> ControlSection {
    let mut control = ControlSection::default();

    if src.peek() == b'd' {
        src.skip(2); // skip "d="
        if let Some(duration) = accept_duration(read_integer(src)) {
            control.duration = duration;
        }
        skip_if(src, b',');
    }

    if src.peek() == b'o' {
        src.skip(2); // skip "o="
        if let Some(octave) = accept_header_octave(read_integer(src)) {
            control.octave = octave;
        }
        skip_if(src, b',');
    }

    if src.peek() == b'b' {
        src.skip(2); // skip "b="
        control.bpm = accept_bpm(read_integer(src));
    }

    skip_if(src, b':');

    control
}

fn parse_control_relaxed<S: ByteSource>(src: &mut S) -> ControlSection {
    let mut control = ControlSection::default();

    loop {
        match src.read() {
            0 | b':' => break,
            key @ (b'd' | b'o' | b'b') if src.peek() == b'=' => {
                src.skip(1);
                let value = read_integer(src);
                match key {
                    b'd' => {
                        if let Some(duration) = accept_duration(value) {
                            control.duration = duration;
                        }
                    }
                    b'o' => {
                        if let Some(octave) = accept_header_octave(value) {
                            control.octave = octave;
                        }
                    }
                    _ => {
                        if value > 0 {
                            control.bpm = accept_bpm(value);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    control
}

/// Parses one note and the comma after it. Never fails, anything the table
/// doesn't know falls back to the control section defaults or a pause.
pub fn parse_note<S: ByteSource>(
    src: &mut S,
    control: &ControlSection,
    parsing: HeaderParsing,
) -> Note {
    if parsing == HeaderParsing::Relaxed {
        skip_whitespace(src);
    }

    let duration = match read_integer(src) {
        0 => control.duration,
        value => accept_duration(value).unwrap_or(control.duration),
    };

    let letter = NoteLetter::from_ascii(src.read()).unwrap_or(NoteLetter::Pause);
    let mut note = Note::new(duration, letter, control.octave);

    if skip_if(src, b'#') {
        note.sharp = !note.is_rest();
    }

    if skip_if(src, b'.') {
        note.dotted = true;
    }

    if src.peek().is_ascii_digit() {
        note.octave = src.read() - b'0';
    }

    // some melodies put the dot after the octave
    if skip_if(src, b'.') {
        note.dotted = true;
    }

    if parsing == HeaderParsing::Relaxed {
        skip_whitespace(src);
    }

    skip_if(src, b',');

    note
}
