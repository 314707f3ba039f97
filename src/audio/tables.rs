// Lookup tables shared by the text parser, the binary codecs and the player.
//
// Every table is read through an index -> value accessor and a value -> index
// search. Both return `None` outside the table, callers never touch the
// arrays directly.

pub const NOTES_PER_OCTAVE: u8 = 12;
pub const LOWEST_OCTAVE: u8 = 4;

pub const NOTE_LETTERS: [u8; 8] = *b"cdefgabp";

// semitone offset of each letter within its octave, 0 is a rest
pub const NOTE_OFFSETS: [u8; 8] = [1, 3, 5, 6, 8, 10, 12, 0];

pub const NOTE_DURATIONS: [u16; 6] = [1, 2, 4, 8, 16, 32];

pub const NOTE_OCTAVES: [u8; 4] = [4, 5, 6, 7];

pub const BPMS: [u16; 32] = [
    25, 28, 31, 35, 40, 45, 50, 56, 63, 70, 80, 90, 100, 112, 125, 140,
    160, 180, 200, 225, 250, 285, 320, 355, 400, 450, 500, 565, 635, 715, 800, 900,
];

// C4 through B7 in Hz
pub const PITCHES: [u16; 48] = [
    262, 277, 294, 311, 330, 349, 370, 392, 415, 440, 466, 494,
    523, 554, 587, 622, 659, 698, 740, 784, 831, 880, 932, 988,
    1047, 1109, 1175, 1245, 1319, 1397, 1480, 1568, 1661, 1760, 1865, 1976,
    2093, 2217, 2349, 2489, 2637, 2794, 2960, 3136, 3322, 3520, 3729, 3951,
];

fn value_at<T: Copy>(table: &[T], index: u8) -> Option<T> {
    table.get(index as usize).copied()
}

fn find_index<T: Copy + PartialEq>(table: &[T], value: T) -> Option<u8> {
    table.iter().position(|v| *v == value).map(|i| i as u8)
}

pub fn note_letter_from_index(index: u8) -> Option<u8> {
    value_at(&NOTE_LETTERS, index)
}

pub fn find_note_letter_index(letter: u8) -> Option<u8> {
    find_index(&NOTE_LETTERS, letter)
}

pub fn note_offset_from_index(index: u8) -> Option<u8> {
    value_at(&NOTE_OFFSETS, index)
}

pub fn duration_from_index(index: u8) -> Option<u16> {
    value_at(&NOTE_DURATIONS, index)
}

pub fn find_duration_index(duration: u16) -> Option<u8> {
    find_index(&NOTE_DURATIONS, duration)
}

pub fn octave_from_index(index: u8) -> Option<u8> {
    value_at(&NOTE_OCTAVES, index)
}

pub fn find_octave_index(octave: u8) -> Option<u8> {
    find_index(&NOTE_OCTAVES, octave)
}

pub fn bpm_from_index(index: u8) -> Option<u16> {
    value_at(&BPMS, index)
}

pub fn find_bpm_index(bpm: u16) -> Option<u8> {
    find_index(&BPMS, bpm)
}

/// Frequency of a semitone `offset` (1..=12, 13 for a sharpened b) within
/// `octave`. `None` for rests and anything that falls outside C4..B7.
pub fn pitch(octave: u8, offset: u8) -> Option<u16> {
    if offset == 0 {
        return None;
    }

    let octave_ind = octave.checked_sub(LOWEST_OCTAVE)? as usize;
    let ind = octave_ind * NOTES_PER_OCTAVE as usize + offset as usize - 1;
    PITCHES.get(ind).copied()
}
