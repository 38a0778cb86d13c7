//! Scale construction, mode rotation, and degree spelling.
//!
//! A [`Scale`] is a tonic note, a [`ScaleFormula`], and a mode index. Two
//! rotation operations are deliberately distinct:
//!
//! - [`Scale::mode`] produces the *diatonic mode relative to the same parent
//!   scale*: the tonic shifts to the new starting degree (mode 1 of C major
//!   is D Dorian, the same seven pitch classes).
//! - [`Scale::parallel_mode`] re-roots the rotated pattern on the *same*
//!   tonic (C major becomes C Dorian, a different pitch-class set).

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::pitch::{Key, Note, PitchClass, PitchClassSet, Spelling, SEMITONES};

/// An ordered offset sequence from a tonic, defining a mode family.
///
/// Offsets must start at 0, strictly increase, and stay below 12. Any
/// cardinality from 2 upward is accepted (pentatonic, hexatonic, heptatonic,
/// chromatic).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScaleFormula {
    name: String,
    offsets: Vec<u8>,
}

impl ScaleFormula {
    /// Validates and builds a scale formula.
    pub fn new(name: impl Into<String>, offsets: Vec<u8>) -> Result<Self, TheoryError> {
        let name = name.into();
        validate_scale_offsets(&name, &offsets)?;
        Ok(ScaleFormula { name, offsets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[u8] {
        &self.offsets
    }

    /// Number of scale degrees.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offsets as a set, for formula comparison.
    pub fn interval_classes(&self) -> PitchClassSet {
        self.offsets
            .iter()
            .map(|&o| PitchClass::new(o as i32))
            .collect()
    }
}

pub(crate) fn validate_scale_offsets(name: &str, offsets: &[u8]) -> Result<(), TheoryError> {
    if offsets.len() < 2 {
        return Err(TheoryError::InvalidFormula {
            name: name.to_string(),
            message: "a scale needs at least 2 degrees".to_string(),
        });
    }
    if offsets[0] != 0 {
        return Err(TheoryError::InvalidFormula {
            name: name.to_string(),
            message: "a scale formula must start at offset 0".to_string(),
        });
    }
    for pair in offsets.windows(2) {
        if pair[1] <= pair[0] {
            return Err(TheoryError::InvalidFormula {
                name: name.to_string(),
                message: format!("offsets must strictly increase ({} after {})", pair[1], pair[0]),
            });
        }
    }
    if let Some(&last) = offsets.last() {
        if last >= SEMITONES {
            return Err(TheoryError::InvalidFormula {
                name: name.to_string(),
                message: format!("offset {} exceeds the octave", last),
            });
        }
    }
    Ok(())
}

/// A tonic note, a formula, and a rotation offset into that formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scale {
    tonic: Note,
    formula: ScaleFormula,
    mode: usize,
}

impl Scale {
    /// Builds the base mode (mode index 0) of a formula on a tonic.
    pub fn build(tonic: Note, formula: ScaleFormula) -> Scale {
        Scale {
            tonic,
            formula,
            mode: 0,
        }
    }

    pub fn tonic(&self) -> Note {
        self.tonic
    }

    pub fn formula(&self) -> &ScaleFormula {
        &self.formula
    }

    /// Rotation offset into the formula: 0 = base mode.
    pub fn mode_index(&self) -> usize {
        self.mode
    }

    /// Number of degrees.
    pub fn len(&self) -> usize {
        self.formula.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }

    /// The `k`th diatonic mode relative to the same parent scale.
    ///
    /// The offset sequence rotates left by `k` and the tonic shifts to the
    /// pitch of the new starting degree, so the pitch-class set is shared
    /// with the parent: mode 1 of C major is D Dorian.
    ///
    /// Round-trips: `scale.mode(k).mode(len - k) == scale`.
    pub fn mode(&self, k: i32) -> Scale {
        let len = self.formula.len();
        let k = k.rem_euclid(len as i32) as usize;
        let shift = self.relative_offset(k);
        let tonic_pc = self.tonic.pitch_class().transpose(shift as i32);
        Scale {
            tonic: tonic_pc.spell(self.preferred_spelling()),
            formula: self.formula.clone(),
            mode: (self.mode + k) % len,
        }
    }

    /// The `k`th mode pattern re-rooted on the *same* tonic.
    ///
    /// This is the non-diatonic sibling of [`Scale::mode`]: C major's
    /// parallel mode 1 is C Dorian, a different pitch-class set built on the
    /// original tonic.
    pub fn parallel_mode(&self, k: i32) -> Scale {
        let len = self.formula.len();
        let k = k.rem_euclid(len as i32) as usize;
        Scale {
            tonic: self.tonic,
            formula: self.formula.clone(),
            mode: (self.mode + k) % len,
        }
    }

    /// Offset of degree `i` above the current tonic, under the current mode.
    fn relative_offset(&self, i: usize) -> u8 {
        let offsets = self.formula.offsets();
        let len = offsets.len();
        let base = offsets[self.mode];
        (offsets[(self.mode + i) % len] + SEMITONES - base) % SEMITONES
    }

    /// The scale degrees as spelled notes, tonic first.
    ///
    /// Heptatonic scales spell one letter per degree, the standard diatonic
    /// spelling (D Dorian reads D E F G A B C). Other cardinalities fall back
    /// to the tonic's key convention.
    pub fn degrees(&self) -> Vec<Note> {
        let len = self.formula.len();
        (0..len)
            .map(|i| self.spell_degree(i))
            .collect()
    }

    /// Spelled note of a single degree; `None` past the formula length.
    pub fn degree(&self, i: usize) -> Option<Note> {
        if i < self.formula.len() {
            Some(self.spell_degree(i))
        } else {
            None
        }
    }

    /// Membership test in pitch-class space.
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.pitch_classes().contains(pc)
    }

    /// The unordered pitch-class set of all degrees.
    pub fn pitch_classes(&self) -> PitchClassSet {
        let tonic_pc = self.tonic.pitch_class();
        (0..self.formula.len())
            .map(|i| tonic_pc.transpose(self.relative_offset(i) as i32))
            .collect()
    }

    /// Structured record for rendering collaborators.
    pub fn describe(&self) -> ScaleDescription {
        ScaleDescription {
            tonic: self.tonic.to_string(),
            name: self.formula.name().to_string(),
            mode: self.mode,
            degrees: self.degrees().iter().map(Note::to_string).collect(),
            pitch_classes: self.pitch_classes().to_vec(),
        }
    }

    fn spell_degree(&self, i: usize) -> Note {
        let pc = self
            .tonic
            .pitch_class()
            .transpose(self.relative_offset(i) as i32);
        if self.formula.len() == 7 {
            // One letter per degree; accidental is the signed difference to
            // the letter's natural pitch class, small alterations only.
            let letter = self.tonic.letter().offset(i as i32);
            let mut delta =
                letter.natural_pitch_class().distance_to(pc) as i32;
            if delta > 6 {
                delta -= 12;
            }
            if delta.abs() <= 2 {
                return Note::new(letter, delta as i8);
            }
        }
        pc.spell(self.preferred_spelling())
    }

    fn preferred_spelling(&self) -> Spelling {
        if self.tonic.accidental() < 0 {
            Spelling::Flat
        } else {
            Spelling::InKey(Key::new(self.tonic.pitch_class()))
        }
    }
}

impl Display for Scale {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.formula.name())?;
        if self.mode > 0 {
            write!(f, " (mode {})", self.mode)?;
        }
        Ok(())
    }
}

/// Inspection record for a scale, shaped for external rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDescription {
    pub tonic: String,
    pub name: String,
    pub mode: usize,
    pub degrees: Vec<String>,
    pub pitch_classes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pitch::NoteLetter;

    fn major() -> ScaleFormula {
        ScaleFormula::new("major", vec![0, 2, 4, 5, 7, 9, 11]).unwrap()
    }

    fn c_major() -> Scale {
        Scale::build(Note::natural(NoteLetter::C), major())
    }

    #[test]
    fn formula_validation() {
        assert!(matches!(
            ScaleFormula::new("bad", vec![0]),
            Err(TheoryError::InvalidFormula { .. })
        ));
        assert!(matches!(
            ScaleFormula::new("bad", vec![2, 4, 7]),
            Err(TheoryError::InvalidFormula { .. })
        ));
        assert!(matches!(
            ScaleFormula::new("bad", vec![0, 4, 4, 7]),
            Err(TheoryError::InvalidFormula { .. })
        ));
        assert!(matches!(
            ScaleFormula::new("bad", vec![0, 4, 12]),
            Err(TheoryError::InvalidFormula { .. })
        ));
        assert!(ScaleFormula::new("pentatonic", vec![0, 2, 4, 7, 9]).is_ok());
    }

    #[test]
    fn c_major_degrees() {
        let degrees: Vec<String> = c_major().degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn mode_one_of_c_major_is_d_dorian() {
        let dorian = c_major().mode(1);
        assert_eq!(dorian.tonic().to_string(), "D");
        assert_eq!(dorian.mode_index(), 1);
        // Same parent pitch-class set, re-keyed to D.
        assert_eq!(dorian.pitch_classes(), c_major().pitch_classes());
        assert_eq!(dorian.pitch_classes().to_vec(), vec![0, 2, 4, 5, 7, 9, 11]);
        let degrees: Vec<String> = dorian.degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["D", "E", "F", "G", "A", "B", "C"]);
    }

    #[test]
    fn parallel_mode_keeps_the_tonic() {
        let c_dorian = c_major().parallel_mode(1);
        assert_eq!(c_dorian.tonic().to_string(), "C");
        // C Dorian: C D Eb F G A Bb - a different set from C major.
        assert_eq!(c_dorian.pitch_classes().to_vec(), vec![0, 2, 3, 5, 7, 9, 10]);
        assert_ne!(c_dorian.pitch_classes(), c_major().pitch_classes());
        let degrees: Vec<String> = c_dorian.degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["C", "D", "Eb", "F", "G", "A", "Bb"]);
    }

    #[test]
    fn mode_rotation_round_trips() {
        let scale = c_major();
        let len = scale.len() as i32;
        for k in 0..len {
            assert_eq!(scale.mode(k).mode(len - k), scale, "round trip failed at {}", k);
        }
    }

    #[test]
    fn all_seven_modes_share_the_parent_set() {
        let parent = c_major();
        for k in 0..7 {
            assert_eq!(parent.mode(k).pitch_classes(), parent.pitch_classes());
        }
    }

    #[test]
    fn f_major_spells_b_flat() {
        let f_major = Scale::build(Note::natural(NoteLetter::F), major());
        let degrees: Vec<String> = f_major.degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["F", "G", "A", "Bb", "C", "D", "E"]);
    }

    #[test]
    fn heptatonic_degrees_use_each_letter_once() {
        let e_major = Scale::build(Note::natural(NoteLetter::E), major());
        let letters: Vec<char> = e_major
            .degrees()
            .iter()
            .map(|n| n.letter().as_char())
            .collect();
        assert_eq!(letters, vec!['E', 'F', 'G', 'A', 'B', 'C', 'D']);
        let degrees: Vec<String> = e_major.degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["E", "F#", "G#", "A", "B", "C#", "D#"]);
    }

    #[test]
    fn pentatonic_falls_back_to_preference_spelling() {
        let formula = ScaleFormula::new("pentatonic_minor", vec![0, 3, 5, 7, 10]).unwrap();
        let scale = Scale::build(Note::natural(NoteLetter::A), formula);
        let degrees: Vec<String> = scale.degrees().iter().map(Note::to_string).collect();
        assert_eq!(degrees, vec!["A", "C", "D", "E", "G"]);
    }

    #[test]
    fn degree_lookup_and_membership() {
        let scale = c_major();
        assert_eq!(scale.degree(4).unwrap().to_string(), "G");
        assert_eq!(scale.degree(7), None);
        assert!(scale.contains(PitchClass::new(4)));
        assert!(!scale.contains(PitchClass::new(6)));
    }

    #[test]
    fn describe_reports_degrees() {
        let description = c_major().mode(5).describe();
        assert_eq!(description.tonic, "A");
        assert_eq!(description.name, "major");
        assert_eq!(description.mode, 5);
        assert_eq!(description.degrees[0], "A");
        assert_eq!(description.pitch_classes, vec![0, 2, 4, 5, 7, 9, 11]);
    }
}
