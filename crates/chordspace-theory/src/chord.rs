//! Chord construction, inversion, and spelling.
//!
//! A [`ChordFormula`] is an immutable offset sequence shared by every chord of
//! one quality; a [`Chord`] is a root note, a formula, and an inversion index.
//! Inversion changes voicing and bass, never pitch-class membership.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::interval::Interval;
use crate::pitch::{Note, PitchClass, PitchClassSet, Spelling, SEMITONES};

/// An ordered sequence of semitone offsets from a root, with a symbolic name.
///
/// Offsets may exceed 11 for extensions (9th = 14, 11th = 17, 13th = 21), but
/// must stay distinct modulo 12: a formula is a sonority recipe, and a
/// repeated pitch class would collapse under inversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChordFormula {
    name: String,
    offsets: Vec<u8>,
}

impl ChordFormula {
    /// Validates and builds a formula.
    ///
    /// Fails with [`TheoryError::InvalidFormula`] when fewer than two offsets
    /// are given or two offsets coincide modulo 12.
    pub fn new(name: impl Into<String>, offsets: Vec<u8>) -> Result<Self, TheoryError> {
        let name = name.into();
        validate_offsets(&name, &offsets)?;
        Ok(ChordFormula { name, offsets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[u8] {
        &self.offsets
    }

    /// Number of chord tones.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offsets reduced modulo 12, as a set. Used for formula comparison.
    pub fn interval_classes(&self) -> PitchClassSet {
        self.offsets
            .iter()
            .map(|&o| PitchClass::new(o as i32))
            .collect()
    }
}

pub(crate) fn validate_offsets(name: &str, offsets: &[u8]) -> Result<(), TheoryError> {
    if offsets.len() < 2 {
        return Err(TheoryError::InvalidFormula {
            name: name.to_string(),
            message: "a formula needs at least 2 offsets".to_string(),
        });
    }
    let mut seen = PitchClassSet::EMPTY;
    for &offset in offsets {
        let pc = PitchClass::new(offset as i32);
        if seen.contains(pc) {
            return Err(TheoryError::InvalidFormula {
                name: name.to_string(),
                message: format!("offset {} duplicates pitch class {}", offset, pc),
            });
        }
        seen.insert(pc);
    }
    Ok(())
}

/// One sounding chord tone: a spelled note plus its octave offset above the
/// bass register. The sequence returned by [`Chord::sounding_notes`] is
/// strictly ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundingNote {
    pub note: Note,
    /// Octaves above the root's register.
    pub octave: i8,
}

/// A root note, a quality formula, and an inversion index.
///
/// Immutable once built. Structural equality compares root spelling, formula,
/// and inversion; [`Chord::same_sonority`] compares pitch-class sets only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    root: Note,
    formula: ChordFormula,
    inversion: usize,
}

impl Chord {
    /// Builds a chord in root position.
    ///
    /// A [`ChordFormula`] is validated at construction and deserialization,
    /// so a malformed formula is unrepresentable here; the
    /// [`TheoryError::InvalidFormula`] failure surfaces where formulas enter
    /// the system (formula construction and table loading).
    pub fn build(root: Note, formula: ChordFormula) -> Chord {
        Chord {
            root,
            formula,
            inversion: 0,
        }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn formula(&self) -> &ChordFormula {
        &self.formula
    }

    /// Inversion index: 0 = root position, bounded by the formula length.
    pub fn inversion(&self) -> usize {
        self.inversion
    }

    /// Rotates the voicing by `n` positions (relative to the current
    /// inversion, modulo the formula length). Negative `n` rotates back.
    ///
    /// The pitch-class set is preserved exactly; only bass and octave
    /// placement change.
    ///
    /// # Examples
    /// ```
    /// use chordspace_theory::chord::{Chord, ChordFormula};
    /// use chordspace_theory::pitch::{Note, NoteLetter};
    ///
    /// let c = Note::natural(NoteLetter::C);
    /// let maj = ChordFormula::new("maj", vec![0, 4, 7]).unwrap();
    /// let first = Chord::build(c, maj).invert(1);
    /// assert_eq!(first.bass().to_string(), "E");
    /// ```
    pub fn invert(&self, n: i32) -> Chord {
        let len = self.formula.len() as i32;
        Chord {
            root: self.root,
            formula: self.formula.clone(),
            inversion: (self.inversion as i32 + n).rem_euclid(len) as usize,
        }
    }

    /// The sounding tones from the bass upward.
    ///
    /// The formula's offset sequence is rotated by the inversion index, then
    /// octave placement is re-derived so the sequence strictly ascends from
    /// the new bass: any tone that would sound at or below its predecessor is
    /// raised by an octave.
    pub fn sounding_notes(&self) -> Vec<SoundingNote> {
        let offsets = self.formula.offsets();
        let len = offsets.len();
        let preference = self.preferred_spelling();
        let root_pc = self.root.pitch_class();

        let mut result: Vec<SoundingNote> = Vec::with_capacity(len);
        let mut prev: Option<i32> = None;
        for i in 0..len {
            let mut semis = offsets[(i + self.inversion) % len] as i32;
            if let Some(prev) = prev {
                while semis <= prev {
                    semis += SEMITONES as i32;
                }
            }
            prev = Some(semis);
            result.push(SoundingNote {
                note: root_pc.transpose(semis).spell(preference),
                octave: semis.div_euclid(SEMITONES as i32) as i8,
            });
        }
        result
    }

    /// The lowest sounding tone.
    pub fn bass(&self) -> Note {
        let offsets = self.formula.offsets();
        let offset = offsets[self.inversion % offsets.len()] as i32;
        self.root
            .pitch_class()
            .transpose(offset)
            .spell(self.preferred_spelling())
    }

    /// The unordered pitch-class set: the chord's sonority key.
    ///
    /// Invariant under inversion.
    pub fn pitch_classes(&self) -> PitchClassSet {
        let root_pc = self.root.pitch_class();
        self.formula
            .offsets()
            .iter()
            .map(|&o| root_pc.transpose(o as i32))
            .collect()
    }

    /// Spells every sounding tone under an explicit preference, in voicing
    /// order.
    pub fn spell_all(&self, preference: Spelling) -> Vec<Note> {
        self.sounding_notes()
            .into_iter()
            .map(|sounding| sounding.note.respell(preference))
            .collect()
    }

    /// True when both chords sound the same pitch-class set, regardless of
    /// root spelling, quality name, or inversion.
    pub fn same_sonority(&self, other: &Chord) -> bool {
        self.pitch_classes() == other.pitch_classes()
    }

    /// Structured record for rendering collaborators.
    pub fn describe(&self) -> ChordDescription {
        ChordDescription {
            root: self.root.to_string(),
            quality: self.formula.name.clone(),
            inversion: self.inversion,
            bass: self.bass().to_string(),
            notes: self
                .sounding_notes()
                .iter()
                .map(|sounding| sounding.note.to_string())
                .collect(),
            intervals: self
                .formula
                .offsets()
                .iter()
                .map(|&o| Interval::new(o as i32).name().to_string())
                .collect(),
            pitch_classes: self.pitch_classes().to_vec(),
        }
    }

    /// Flat roots spell flat, everything else spells sharp.
    fn preferred_spelling(&self) -> Spelling {
        if self.root.accidental() < 0 {
            Spelling::Flat
        } else {
            Spelling::Sharp
        }
    }
}

impl Display for Chord {
    /// `Cmaj7`, or slash notation when inverted (`Cmaj7/E`).
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.formula.name)?;
        if self.inversion > 0 {
            write!(f, "/{}", self.bass())?;
        }
        Ok(())
    }
}

/// Inspection record for a chord, shaped for external rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDescription {
    pub root: String,
    pub quality: String,
    pub inversion: usize,
    pub bass: String,
    pub notes: Vec<String>,
    pub intervals: Vec<String>,
    pub pitch_classes: Vec<u8>,
}
