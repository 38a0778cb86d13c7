//! Pitch-class arithmetic and enharmonic note spelling.
//!
//! A [`PitchClass`] is a tone identity with octave information discarded,
//! always normalized to `[0, 12)`. A [`Note`] adds a display spelling (letter
//! plus accidental count) on top of a pitch class; two notes with the same
//! pitch class but different spellings are enharmonically equal but not
//! identical. Spelling is preserved for display, never for arithmetic.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;

/// Number of pitch classes in the equal-tempered octave.
pub const SEMITONES: u8 = 12;

/// Sharp spellings indexed by pitch class.
const SHARP_SPELLINGS: [(NoteLetter, i8); 12] = [
    (NoteLetter::C, 0),
    (NoteLetter::C, 1),
    (NoteLetter::D, 0),
    (NoteLetter::D, 1),
    (NoteLetter::E, 0),
    (NoteLetter::F, 0),
    (NoteLetter::F, 1),
    (NoteLetter::G, 0),
    (NoteLetter::G, 1),
    (NoteLetter::A, 0),
    (NoteLetter::A, 1),
    (NoteLetter::B, 0),
];

/// Flat spellings indexed by pitch class.
const FLAT_SPELLINGS: [(NoteLetter, i8); 12] = [
    (NoteLetter::C, 0),
    (NoteLetter::D, -1),
    (NoteLetter::D, 0),
    (NoteLetter::E, -1),
    (NoteLetter::E, 0),
    (NoteLetter::F, 0),
    (NoteLetter::G, -1),
    (NoteLetter::G, 0),
    (NoteLetter::A, -1),
    (NoteLetter::A, 0),
    (NoteLetter::B, -1),
    (NoteLetter::B, 0),
];

/// A tone identity in 12-tone equal temperament, octave discarded.
///
/// All constructors normalize, so a `PitchClass` is always in `[0, 12)` and
/// arithmetic is modulo 12.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Reduces any integer to a pitch class via modular arithmetic. Never fails.
    ///
    /// # Examples
    /// ```
    /// use chordspace_theory::pitch::PitchClass;
    ///
    /// assert_eq!(PitchClass::new(13).value(), 1);
    /// assert_eq!(PitchClass::new(-1).value(), 11);
    /// ```
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(SEMITONES as i32) as u8)
    }

    /// The normalized value in `[0, 12)`.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Ascending semitone count from `self` to `other`: `(b - a) mod 12`.
    ///
    /// Directed: `distance_to` and its reverse sum to 12 unless both are 0.
    pub fn distance_to(self, other: PitchClass) -> u8 {
        (other.0 + SEMITONES - self.0) % SEMITONES
    }

    /// Undirected distance on the pitch-class circle, in `[0, 6]`.
    pub fn circular_distance(self, other: PitchClass) -> u8 {
        let d = self.distance_to(other);
        d.min(SEMITONES - d)
    }

    /// Moves by a signed number of semitones, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }

    /// True for the seven classes that spell without an accidental.
    pub fn is_natural(self) -> bool {
        SHARP_SPELLINGS[self.0 as usize].1 == 0
    }

    /// Spells this pitch class under an explicit preference. Deterministic.
    ///
    /// # Examples
    /// ```
    /// use chordspace_theory::pitch::{PitchClass, Spelling};
    ///
    /// let bb = PitchClass::new(10).spell(Spelling::Flat);
    /// assert_eq!(bb.to_string(), "Bb");
    /// ```
    pub fn spell(self, preference: Spelling) -> Note {
        let flats = match preference {
            Spelling::Sharp => false,
            Spelling::Flat => true,
            Spelling::InKey(key) => key.prefers_flats(),
        };
        let (letter, accidental) = if flats {
            FLAT_SPELLINGS[self.0 as usize]
        } else {
            SHARP_SPELLINGS[self.0 as usize]
        };
        Note::new(letter, accidental)
    }

    /// Spells this pitch class, failing with [`TheoryError::SpellingAmbiguous`]
    /// for the five classes where sharp and flat spellings are equally valid.
    pub fn try_spell(self) -> Result<Note, TheoryError> {
        if self.is_natural() {
            Ok(self.spell(Spelling::Sharp))
        } else {
            Err(TheoryError::SpellingAmbiguous { pc: self.0 })
        }
    }

    /// Spells this pitch class with the documented sharp-preferring default.
    pub fn spell_default(self) -> Note {
        self.spell(Spelling::Sharp)
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        PitchClass(value % SEMITONES)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unordered set of pitch classes, one bit per class.
///
/// This is the sonority key used for chord matching: subset and intersection
/// tests are single bitwise operations. Serializes as a sorted list of values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct PitchClassSet(u16);

impl PitchClassSet {
    /// The empty set.
    pub const EMPTY: PitchClassSet = PitchClassSet(0);

    /// Adds a pitch class in place.
    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << pc.value();
    }

    /// Returns a copy with `pc` added.
    pub fn with(mut self, pc: PitchClass) -> Self {
        self.insert(pc);
        self
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.value()) != 0
    }

    /// Number of member pitch classes.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 | other.0)
    }

    pub fn intersection(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 & other.0)
    }

    pub fn difference(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 & !other.0)
    }

    /// True when every member of `self` is a member of `other`.
    pub fn is_subset(self, other: PitchClassSet) -> bool {
        self.0 & other.0 == self.0
    }

    /// True when every member of `other` is a member of `self`.
    pub fn is_superset(self, other: PitchClassSet) -> bool {
        other.is_subset(self)
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        (0..SEMITONES)
            .filter(move |pc| self.0 & (1 << pc) != 0)
            .map(|pc| PitchClass(pc))
    }

    /// Members as a sorted `Vec` of raw values, for display and serialization.
    pub fn to_vec(self) -> Vec<u8> {
        self.iter().map(PitchClass::value).collect()
    }
}

impl FromIterator<PitchClass> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchClassSet::EMPTY;
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl From<Vec<u8>> for PitchClassSet {
    fn from(values: Vec<u8>) -> Self {
        values.into_iter().map(|v| PitchClass::new(v as i32)).collect()
    }
}

impl From<PitchClassSet> for Vec<u8> {
    fn from(set: PitchClassSet) -> Vec<u8> {
        set.to_vec()
    }
}

impl Display for PitchClassSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, pc) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", pc)?;
        }
        write!(f, "}}")
    }
}

/// The seven letter names, in C-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

/// Natural pitch class per letter, in letter order (C=0, D=2, E=4, F=5, G=7, A=9, B=11).
const NATURAL_PITCH_CLASSES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

const LETTERS: [NoteLetter; 7] = [
    NoteLetter::C,
    NoteLetter::D,
    NoteLetter::E,
    NoteLetter::F,
    NoteLetter::G,
    NoteLetter::A,
    NoteLetter::B,
];

impl NoteLetter {
    /// Pitch class of the unaltered letter.
    pub fn natural_pitch_class(self) -> PitchClass {
        PitchClass(NATURAL_PITCH_CLASSES[self.index()])
    }

    /// Steps through the letter cycle (C -> D -> ... -> B -> C).
    pub fn offset(self, steps: i32) -> NoteLetter {
        LETTERS[(self.index() as i32 + steps).rem_euclid(7) as usize]
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<NoteLetter> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 1,
            NoteLetter::E => 2,
            NoteLetter::F => 3,
            NoteLetter::G => 4,
            NoteLetter::A => 5,
            NoteLetter::B => 6,
        }
    }
}

/// A pitch class plus its display spelling.
///
/// The pitch class is derived from letter and accidental, never stored, so a
/// `Note` cannot disagree with its own spelling. Structural equality compares
/// spellings; use [`Note::is_enharmonic`] to compare sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    letter: NoteLetter,
    accidental: i8,
}

impl Note {
    /// A note from a letter and a signed accidental count (sharps positive).
    pub fn new(letter: NoteLetter, accidental: i8) -> Self {
        Note { letter, accidental }
    }

    /// The unaltered letter.
    pub fn natural(letter: NoteLetter) -> Self {
        Note {
            letter,
            accidental: 0,
        }
    }

    pub fn letter(&self) -> NoteLetter {
        self.letter
    }

    /// Signed accidental count: 1 = sharp, -1 = flat, 2 = double sharp.
    pub fn accidental(&self) -> i8 {
        self.accidental
    }

    /// The sounding pitch class.
    pub fn pitch_class(&self) -> PitchClass {
        self.letter.natural_pitch_class().transpose(self.accidental as i32)
    }

    /// True when both notes denote the same pitch class, regardless of spelling.
    ///
    /// # Examples
    /// ```
    /// use chordspace_theory::pitch::{Note, NoteLetter};
    ///
    /// let c_sharp = Note::new(NoteLetter::C, 1);
    /// let d_flat = Note::new(NoteLetter::D, -1);
    /// assert!(c_sharp.is_enharmonic(&d_flat));
    /// assert_ne!(c_sharp, d_flat);
    /// ```
    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    /// Respells to the canonical spelling under `preference`.
    pub fn respell(&self, preference: Spelling) -> Note {
        self.pitch_class().spell(preference)
    }
}

impl Display for Note {
    /// ASCII by default (`C#`, `Bb`); the alternate form uses `♯`/`♭`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let (count, plain, pretty) = if self.accidental >= 0 {
            (self.accidental, '#', '\u{266F}')
        } else {
            (-self.accidental, 'b', '\u{266D}')
        };
        let mark = if f.alternate() { pretty } else { plain };
        for _ in 0..count {
            write!(f, "{}", mark)?;
        }
        Ok(())
    }
}

/// Spelling preference for mapping a pitch class back to a note name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    /// Prefer sharp spellings (the engine-wide default policy).
    Sharp,
    /// Prefer flat spellings.
    Flat,
    /// Follow the convention of a key (flat keys spell flat).
    InKey(Key),
}

/// A key identified by its tonic, used only for spelling conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    tonic: PitchClass,
}

impl Key {
    pub fn new(tonic: PitchClass) -> Self {
        Key { tonic }
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    /// Flat-side keys of the circle of fifths: F, Bb, Eb, Ab, Db.
    ///
    /// Pitch class 6 could head either side; it resolves to F# per the sharp
    /// default policy.
    pub fn prefers_flats(&self) -> bool {
        matches!(self.tonic.value(), 1 | 3 | 5 | 8 | 10)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(PitchClass::new(0).value(), 0);
        assert_eq!(PitchClass::new(12).value(), 0);
        assert_eq!(PitchClass::new(25).value(), 1);
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(-13).value(), 11);
    }

    #[test]
    fn distance_is_directed() {
        let c = PitchClass::new(0);
        let g = PitchClass::new(7);
        assert_eq!(c.distance_to(g), 7);
        assert_eq!(g.distance_to(c), 5);
    }

    #[test]
    fn distance_symmetry_sums_to_octave() {
        for a in 0..12 {
            for b in 0..12 {
                let a = PitchClass::new(a);
                let b = PitchClass::new(b);
                let forward = a.distance_to(b);
                let backward = b.distance_to(a);
                if a == b {
                    assert_eq!(forward, 0);
                    assert_eq!(backward, 0);
                } else {
                    assert_eq!((forward + backward) % 12, 0);
                }
            }
        }
    }

    #[test]
    fn circular_distance_never_exceeds_tritone() {
        for a in 0..12 {
            for b in 0..12 {
                let d = PitchClass::new(a).circular_distance(PitchClass::new(b));
                assert!(d <= 6, "distance {} for {} -> {}", d, a, b);
            }
        }
    }

    #[test]
    fn sharp_and_flat_spellings() {
        let pc = PitchClass::new(10);
        assert_eq!(pc.spell(Spelling::Sharp).to_string(), "A#");
        assert_eq!(pc.spell(Spelling::Flat).to_string(), "Bb");
    }

    #[test]
    fn key_context_spelling() {
        // Within a flat key, pitch class 10 spells as Bb, not A#.
        let f_major = Key::new(PitchClass::new(5));
        let spelled = PitchClass::new(10).spell(Spelling::InKey(f_major));
        assert_eq!(spelled.to_string(), "Bb");

        let g_major = Key::new(PitchClass::new(7));
        let spelled = PitchClass::new(6).spell(Spelling::InKey(g_major));
        assert_eq!(spelled.to_string(), "F#");
    }

    #[test]
    fn ambiguous_spelling_requires_preference() {
        assert!(PitchClass::new(0).try_spell().is_ok());
        let err = PitchClass::new(1).try_spell().unwrap_err();
        assert_eq!(err, TheoryError::SpellingAmbiguous { pc: 1 });
        assert_eq!(err.code(), "THEORY_002");
        // The documented default resolves to the sharp spelling.
        assert_eq!(PitchClass::new(1).spell_default().to_string(), "C#");
    }

    #[test]
    fn note_spelling_is_preserved_not_arithmetic() {
        let c_sharp = Note::new(NoteLetter::C, 1);
        let d_flat = Note::new(NoteLetter::D, -1);
        assert!(c_sharp.is_enharmonic(&d_flat));
        assert_ne!(c_sharp, d_flat);
        assert_eq!(c_sharp.pitch_class(), d_flat.pitch_class());
    }

    #[test]
    fn pretty_display_uses_accidental_glyphs() {
        let b_flat = Note::new(NoteLetter::B, -1);
        assert_eq!(format!("{:#}", b_flat), "B\u{266D}");
        let f_sharp = Note::new(NoteLetter::F, 1);
        assert_eq!(format!("{:#}", f_sharp), "F\u{266F}");
    }

    #[test]
    fn set_operations() {
        let triad: PitchClassSet = [0, 4, 7].iter().map(|&v| PitchClass::new(v)).collect();
        let pivot = PitchClassSet::EMPTY
            .with(PitchClass::new(0))
            .with(PitchClass::new(4));

        assert_eq!(triad.len(), 3);
        assert!(pivot.is_subset(triad));
        assert!(triad.is_superset(pivot));
        assert_eq!(triad.intersection(pivot).len(), 2);
        assert_eq!(triad.difference(pivot).to_vec(), vec![7]);
        assert_eq!(triad.union(pivot), triad);
        assert_eq!(triad.to_vec(), vec![0, 4, 7]);
    }

    #[test]
    fn set_serde_round_trip() {
        let set: PitchClassSet = [11, 4, 0, 7].iter().map(|&v| PitchClass::new(v)).collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[0,4,7,11]");
        let back: PitchClassSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn letter_cycle() {
        assert_eq!(NoteLetter::B.offset(1), NoteLetter::C);
        assert_eq!(NoteLetter::C.offset(-1), NoteLetter::B);
        assert_eq!(NoteLetter::D.offset(7), NoteLetter::D);
    }
}
