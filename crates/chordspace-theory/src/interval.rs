//! Named intervals and interval arithmetic.
//!
//! An [`Interval`] is a directionless semitone distance in `[0, 12)` with a
//! canonical quality name derived from a fixed table. Equality keys on the
//! semitone distance alone; the name is never independently settable.
//! [`DirectedInterval`] adds a direction flag for melodic motion.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::pitch::{Note, PitchClass, SEMITONES};

/// Canonical quality names indexed by semitone distance.
const INTERVAL_NAMES: [&str; 12] = [
    "perfect unison",
    "minor second",
    "major second",
    "minor third",
    "major third",
    "perfect fourth",
    "tritone",
    "perfect fifth",
    "minor sixth",
    "major sixth",
    "minor seventh",
    "major seventh",
];

/// Augmented/diminished alternates, for enharmonic-aware naming on request.
const ENHARMONIC_NAMES: [&[&str]; 12] = [
    &["diminished second"],
    &["augmented unison"],
    &["diminished third"],
    &["augmented second"],
    &["diminished fourth"],
    &["augmented third"],
    &["augmented fourth", "diminished fifth"],
    &["diminished sixth"],
    &["augmented fifth"],
    &["diminished seventh"],
    &["augmented sixth"],
    &["diminished octave"],
];

/// A directionless interval: a semitone distance in `[0, 12)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(from = "u8", into = "u8")]
pub struct Interval(u8);

impl Interval {
    /// Builds an interval from any signed semitone count, normalized modulo 12.
    pub fn new(semitones: i32) -> Self {
        Interval(semitones.rem_euclid(SEMITONES as i32) as u8)
    }

    /// The ascending interval from `a` to `b`, ignoring spelling.
    ///
    /// # Examples
    /// ```
    /// use chordspace_theory::interval::Interval;
    /// use chordspace_theory::pitch::{Note, NoteLetter};
    ///
    /// let c = Note::natural(NoteLetter::C);
    /// let e = Note::natural(NoteLetter::E);
    /// assert_eq!(Interval::between(&c, &e).name(), "major third");
    /// ```
    pub fn between(a: &Note, b: &Note) -> Interval {
        Interval(a.pitch_class().distance_to(b.pitch_class()))
    }

    pub const fn semitones(self) -> u8 {
        self.0
    }

    /// The canonical quality name (0 = "perfect unison" ... 11 = "major seventh").
    pub fn name(self) -> &'static str {
        INTERVAL_NAMES[self.0 as usize]
    }

    /// Augmented/diminished alternates for this distance, when the caller
    /// explicitly wants enharmonic naming (e.g. 6 -> augmented fourth or
    /// diminished fifth).
    pub fn enharmonic_names(self) -> &'static [&'static str] {
        ENHARMONIC_NAMES[self.0 as usize]
    }

    /// Classic interval inversion: `(12 - s) mod 12`.
    ///
    /// The unison is the documented edge case: it inverts to the octave,
    /// which reduces back to a unison in pitch-class space, so inversion is
    /// an involution over the whole domain.
    pub fn invert(self) -> Interval {
        Interval((SEMITONES - self.0) % SEMITONES)
    }

    /// Applies this interval upward from a pitch class.
    pub fn above(self, pc: PitchClass) -> PitchClass {
        pc.transpose(self.0 as i32)
    }

    /// Applies this interval downward from a pitch class.
    pub fn below(self, pc: PitchClass) -> PitchClass {
        pc.transpose(-(self.0 as i32))
    }
}

impl From<u8> for Interval {
    fn from(value: u8) -> Self {
        Interval(value % SEMITONES)
    }
}

impl From<Interval> for u8 {
    fn from(interval: Interval) -> u8 {
        interval.0
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of melodic motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

/// An interval with a direction, for melodic motion between notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedInterval {
    pub interval: Interval,
    pub direction: Direction,
}

impl DirectedInterval {
    /// The shortest motion from `a` to `b`; a tritone resolves ascending.
    pub fn between(a: &Note, b: &Note) -> DirectedInterval {
        let up = a.pitch_class().distance_to(b.pitch_class());
        if up <= SEMITONES / 2 {
            DirectedInterval {
                interval: Interval(up),
                direction: Direction::Ascending,
            }
        } else {
            DirectedInterval {
                interval: Interval(SEMITONES - up),
                direction: Direction::Descending,
            }
        }
    }

    /// Signed semitone motion: positive ascending, negative descending.
    pub fn semitone_motion(self) -> i8 {
        match self.direction {
            Direction::Ascending => self.interval.semitones() as i8,
            Direction::Descending => -(self.interval.semitones() as i8),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pitch::NoteLetter;

    #[test]
    fn canonical_names() {
        assert_eq!(Interval::new(0).name(), "perfect unison");
        assert_eq!(Interval::new(3).name(), "minor third");
        assert_eq!(Interval::new(6).name(), "tritone");
        assert_eq!(Interval::new(11).name(), "major seventh");
        // Distances normalize before naming.
        assert_eq!(Interval::new(12).name(), "perfect unison");
        assert_eq!(Interval::new(-3).name(), "major sixth");
    }

    #[test]
    fn enharmonic_alternates_on_request() {
        assert_eq!(
            Interval::new(6).enharmonic_names(),
            &["augmented fourth", "diminished fifth"]
        );
        assert_eq!(Interval::new(3).enharmonic_names(), &["augmented second"]);
    }

    #[test]
    fn inversion_rule() {
        assert_eq!(Interval::new(4).invert(), Interval::new(8));
        assert_eq!(Interval::new(7).invert(), Interval::new(5));
        // Unison inverts to the octave, which is a unison in pitch-class space.
        assert_eq!(Interval::new(0).invert(), Interval::new(0));
    }

    #[test]
    fn inversion_is_an_involution() {
        for s in 0..12 {
            let i = Interval::new(s);
            assert_eq!(i.invert().invert(), i);
        }
    }

    #[test]
    fn between_ignores_spelling() {
        let c_sharp = Note::new(NoteLetter::C, 1);
        let d_flat = Note::new(NoteLetter::D, -1);
        let f = Note::natural(NoteLetter::F);
        assert_eq!(Interval::between(&c_sharp, &f), Interval::between(&d_flat, &f));
    }

    #[test]
    fn directed_motion_picks_the_shorter_path() {
        let c = Note::natural(NoteLetter::C);
        let b = Note::natural(NoteLetter::B);
        let motion = DirectedInterval::between(&c, &b);
        assert_eq!(motion.direction, Direction::Descending);
        assert_eq!(motion.semitone_motion(), -1);

        let d = Note::natural(NoteLetter::D);
        let motion = DirectedInterval::between(&c, &d);
        assert_eq!(motion.direction, Direction::Ascending);
        assert_eq!(motion.semitone_motion(), 2);
    }
}
