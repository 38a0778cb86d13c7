//! Parsing of note, chord, and scale symbols in standard theory notation.
//!
//! Roots and tonics use letter names with `#`/`b` accidentals (`s` is
//! accepted for sharp, as is repeating an accidental for doubles). Qualities
//! and scale names resolve against the injectable tables; nothing here is
//! hardcoded beyond the note letters themselves.

use crate::chord::Chord;
use crate::error::TheoryError;
use crate::pitch::{Note, NoteLetter};
use crate::scale::Scale;
use crate::tables::{QualityTable, ScaleTable};

/// Parses a note symbol such as `C`, `F#`, `Bb`, or `Abb`.
///
/// # Examples
/// ```
/// use chordspace_theory::symbol::parse_note;
///
/// let note = parse_note("Eb").unwrap();
/// assert_eq!(note.pitch_class().value(), 3);
/// assert_eq!(note.accidental(), -1);
/// ```
pub fn parse_note(symbol: &str) -> Result<Note, TheoryError> {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();
    let letter = chars
        .next()
        .and_then(NoteLetter::from_char)
        .ok_or_else(|| invalid_note(symbol))?;

    let mut accidental: i8 = 0;
    for c in chars {
        match c {
            '#' | 's' | '\u{266F}' => {
                if accidental < 0 {
                    return Err(invalid_note(symbol));
                }
                accidental += 1;
            }
            'b' | '\u{266D}' => {
                if accidental > 0 {
                    return Err(invalid_note(symbol));
                }
                accidental -= 1;
            }
            _ => return Err(invalid_note(symbol)),
        }
    }
    Ok(Note::new(letter, accidental))
}

/// Builds a chord from a root symbol and a quality symbol resolved against
/// the table.
///
/// # Examples
/// ```
/// use chordspace_theory::symbol::build_chord;
/// use chordspace_theory::tables::QualityTable;
///
/// let chord = build_chord("C", "maj7", &QualityTable::default()).unwrap();
/// assert_eq!(chord.pitch_classes().to_vec(), vec![0, 4, 7, 11]);
/// ```
pub fn build_chord(
    root: &str,
    quality: &str,
    table: &QualityTable,
) -> Result<Chord, TheoryError> {
    let root = parse_note(root)?;
    let formula = table.formula(quality)?;
    Ok(Chord::build(root, formula))
}

/// Builds a scale from a tonic symbol and a scale symbol resolved against
/// the table.
pub fn build_scale(
    tonic: &str,
    name: &str,
    table: &ScaleTable,
) -> Result<Scale, TheoryError> {
    let tonic = parse_note(tonic)?;
    let formula = table.formula(name)?;
    Ok(Scale::build(tonic, formula))
}

/// Parses a combined chord symbol such as `Cmaj7`, `F#m7`, or `C/E`.
///
/// The part after a single `/` names a bass note; when that note is a chord
/// tone, the matching inversion is selected, otherwise the parse fails with
/// [`TheoryError::BassNotInChord`]. An empty quality means a major triad.
pub fn parse_chord_symbol(symbol: &str, table: &QualityTable) -> Result<Chord, TheoryError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(invalid_note(symbol));
    }

    let (main, bass) = match trimmed.split_once('/') {
        Some((_, b)) if b.contains('/') => return Err(invalid_note(symbol)),
        Some((a, b)) => (a.trim(), Some(b.trim())),
        None => (trimmed, None),
    };

    // Root = leading letter plus any run of accidentals that still leaves a
    // resolvable quality. "Cb5" is C-flat power chord, "Cm" is C minor.
    let bytes = main.as_bytes();
    if bytes.is_empty() {
        return Err(invalid_note(symbol));
    }
    let mut root_len = 1;
    while root_len < bytes.len() && matches!(bytes[root_len], b'#' | b'b') {
        root_len += 1;
    }
    let (root, quality) = split_root_quality(main, root_len, table)?;

    let chord = Chord::build(root, table.formula(quality)?);
    match bass {
        None => Ok(chord),
        Some(bass_symbol) => {
            let bass = parse_note(bass_symbol)?;
            let root_pc = chord.root().pitch_class();
            let offsets = chord.formula().offsets();
            let position = offsets.iter().position(|&o| {
                root_pc.transpose(o as i32) == bass.pitch_class()
            });
            match position {
                Some(i) => Ok(chord.invert(i as i32)),
                None => Err(TheoryError::BassNotInChord {
                    symbol: trimmed.to_string(),
                    bass: bass_symbol.to_string(),
                }),
            }
        }
    }
}

/// Finds the split point between root accidentals and the quality suffix.
///
/// A trailing `b` run is ambiguous ("Cb5" vs "Cm7b5" handled earlier by the
/// quality test): prefer the longest accidental run whose remaining suffix
/// resolves in the table.
fn split_root_quality<'a>(
    main: &'a str,
    max_root_len: usize,
    table: &QualityTable,
) -> Result<(Note, &'a str), TheoryError> {
    for root_len in (1..=max_root_len).rev() {
        let rest = &main[root_len..];
        let quality = if rest.is_empty() { "maj" } else { rest };
        if table.contains(quality) {
            if let Ok(root) = parse_note(&main[..root_len]) {
                return Ok((root, quality));
            }
        }
    }
    Err(TheoryError::UnknownQuality {
        symbol: main.to_string(),
    })
}

fn invalid_note(symbol: &str) -> TheoryError {
    TheoryError::InvalidNoteSymbol {
        symbol: symbol.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pitch::Spelling;

    #[test]
    fn parse_note_accidentals() {
        assert_eq!(parse_note("C").unwrap().pitch_class().value(), 0);
        assert_eq!(parse_note("C#").unwrap().pitch_class().value(), 1);
        assert_eq!(parse_note("Cs").unwrap().pitch_class().value(), 1);
        assert_eq!(parse_note("Bb").unwrap().pitch_class().value(), 10);
        assert_eq!(parse_note("F##").unwrap().pitch_class().value(), 7);
        assert_eq!(parse_note("Abb").unwrap().pitch_class().value(), 7);
        // Spelling is preserved, not collapsed.
        assert_eq!(parse_note("Cb").unwrap().to_string(), "Cb");
    }

    #[test]
    fn parse_note_rejects_garbage() {
        for bad in ["", "H", "C#b", "Cx", "7"] {
            let err = parse_note(bad).unwrap_err();
            assert_eq!(err.code(), "THEORY_003", "expected rejection of {:?}", bad);
        }
    }

    #[test]
    fn build_chord_scenario() {
        let chord = build_chord("C", "maj7", &QualityTable::default()).unwrap();
        let names: Vec<String> = chord
            .sounding_notes()
            .iter()
            .map(|s| s.note.to_string())
            .collect();
        assert_eq!(names, vec!["C", "E", "G", "B"]);
        assert_eq!(chord.pitch_classes().to_vec(), vec![0, 4, 7, 11]);
    }

    #[test]
    fn build_chord_unknown_quality() {
        let err = build_chord("C", "majj7", &QualityTable::default()).unwrap_err();
        assert!(matches!(err, TheoryError::UnknownQuality { .. }));
    }

    #[test]
    fn build_scale_resolves_modes() {
        let scale = build_scale("D", "dorian", &ScaleTable::default()).unwrap();
        assert_eq!(scale.pitch_classes().to_vec(), vec![0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn combined_symbols() {
        let table = QualityTable::default();

        let chord = parse_chord_symbol("F#m7", &table).unwrap();
        assert_eq!(chord.root().to_string(), "F#");
        assert_eq!(chord.formula().name(), "m7");

        let chord = parse_chord_symbol("Bbmaj7", &table).unwrap();
        assert_eq!(chord.root().to_string(), "Bb");
        assert_eq!(chord.formula().name(), "maj7");

        // Bare root means a major triad.
        let chord = parse_chord_symbol("Eb", &table).unwrap();
        assert_eq!(chord.formula().name(), "maj");
        let names: Vec<String> = chord.spell_all(Spelling::Flat).iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["Eb", "G", "Bb"]);
    }

    #[test]
    fn ambiguous_flat_vs_quality() {
        let table = QualityTable::default();

        // "Cm7b5" keeps the quality, "Cb5" reads as a C-flat power chord.
        let chord = parse_chord_symbol("Cm7b5", &table).unwrap();
        assert_eq!(chord.formula().name(), "m7b5");
        let chord = parse_chord_symbol("Cb5", &table).unwrap();
        assert_eq!(chord.root().to_string(), "Cb");
        assert_eq!(chord.formula().name(), "5");
    }

    #[test]
    fn slash_bass_selects_the_inversion() {
        let table = QualityTable::default();
        let chord = parse_chord_symbol("C/E", &table).unwrap();
        assert_eq!(chord.inversion(), 1);
        assert_eq!(chord.bass().to_string(), "E");
        assert_eq!(chord, parse_chord_symbol("C", &table).unwrap().invert(1));

        let chord = parse_chord_symbol("Cmaj7/B", &table).unwrap();
        assert_eq!(chord.inversion(), 3);
    }

    #[test]
    fn slash_bass_must_be_a_chord_tone() {
        let err = parse_chord_symbol("C/F", &QualityTable::default()).unwrap_err();
        assert!(matches!(err, TheoryError::BassNotInChord { .. }));
        assert_eq!(err.code(), "THEORY_006");
    }
}
