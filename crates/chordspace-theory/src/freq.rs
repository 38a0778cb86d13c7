//! Note, MIDI number, and frequency conversion.
//!
//! Octaves follow scientific pitch notation with MIDI note 60 = C4. The
//! octave attaches to the pitch class, not the letter, so `Cb4` maps like
//! `B4`; callers tracking sounding registers across enharmonic respellings
//! should work in MIDI numbers directly.

use crate::pitch::Note;

/// A frequency in Hz.
pub type Hertz = f64;

/// Concert pitch reference: A4.
pub const CONCERT_A_HZ: Hertz = 440.0;

/// MIDI note number of A4.
pub const CONCERT_A_MIDI: u8 = 69;

/// Converts a note in an octave to a MIDI note number, clamped to 0..=127.
///
/// # Examples
/// ```
/// use chordspace_theory::freq::note_to_midi;
/// use chordspace_theory::pitch::{Note, NoteLetter};
///
/// assert_eq!(note_to_midi(&Note::natural(NoteLetter::C), 4), 60);
/// assert_eq!(note_to_midi(&Note::natural(NoteLetter::A), 4), 69);
/// ```
pub fn note_to_midi(note: &Note, octave: i8) -> u8 {
    let n = (octave as i32 + 1) * 12 + note.pitch_class().value() as i32;
    n.clamp(0, 127) as u8
}

/// Converts a MIDI note number to frequency: `f = 440 * 2^((n - 69) / 12)`.
///
/// # Examples
/// ```
/// use chordspace_theory::freq::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 0.001);
/// assert!((midi_to_freq(60) - 261.626).abs() < 0.01);
/// ```
pub fn midi_to_freq(midi_note: u8) -> Hertz {
    CONCERT_A_HZ * 2.0_f64.powf((midi_note as f64 - CONCERT_A_MIDI as f64) / 12.0)
}

/// Converts a frequency to the nearest MIDI note number.
pub fn freq_to_midi(freq: Hertz) -> u8 {
    let note = CONCERT_A_MIDI as f64 + 12.0 * (freq / CONCERT_A_HZ).log2();
    note.round().clamp(0.0, 127.0) as u8
}

/// Frequency of a note in an octave.
pub fn note_to_freq(note: &Note, octave: i8) -> Hertz {
    midi_to_freq(note_to_midi(note, octave))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{Note, NoteLetter};

    #[test]
    fn concert_pitch_references() {
        assert!((midi_to_freq(69) - 440.0).abs() < 0.001);
        assert!((midi_to_freq(57) - 220.0).abs() < 0.001);
        assert_eq!(freq_to_midi(440.0), 69);
        assert_eq!(freq_to_midi(261.626), 60);
    }

    #[test]
    fn midi_round_trip() {
        for midi in 0..=127u8 {
            assert_eq!(freq_to_midi(midi_to_freq(midi)), midi);
        }
    }

    #[test]
    fn octave_mapping() {
        let a = Note::natural(NoteLetter::A);
        assert_eq!(note_to_midi(&a, 4), 69);
        assert_eq!(note_to_midi(&a, 3), 57);
        let c_sharp = Note::new(NoteLetter::C, 1);
        assert_eq!(note_to_midi(&c_sharp, 4), 61);
    }

    #[test]
    fn note_frequencies() {
        let a = Note::natural(NoteLetter::A);
        assert!((note_to_freq(&a, 4) - 440.0).abs() < 0.001);
        let e = Note::natural(NoteLetter::E);
        assert!((note_to_freq(&e, 4) - 329.628).abs() < 0.01);
    }
}
