//! Chordspace Theory Core - Pitch Classes, Intervals, Chords, and Scales
//!
//! This crate models Western 12-tone music theory as immutable values built
//! on exact modular arithmetic, with enharmonic spelling kept separate from
//! pitch arithmetic. It is the foundation the exploration graph in
//! `chordspace-graph` is built on.
//!
//! # Overview
//!
//! - **Pitch space**: [`pitch::PitchClass`] arithmetic is modulo 12 and all
//!   constructors normalize; [`pitch::Note`] carries a display spelling that
//!   never participates in arithmetic.
//! - **Intervals**: [`interval::Interval`] equality keys on semitone distance
//!   alone; quality names are derived from a canonical table.
//! - **Chords and scales**: [`chord::Chord`] and [`scale::Scale`] are built
//!   from injectable formula tables; inversion and mode rotation never change
//!   pitch-class membership of the underlying sonority or parent scale.
//! - **Configuration over code**: the chord-quality and scale tables in
//!   [`tables`] are plain name-to-offsets mappings, serde-round-trippable and
//!   extensible without touching engine logic.
//!
//! # Example
//!
//! ```
//! use chordspace_theory::symbol::{build_chord, build_scale};
//! use chordspace_theory::tables::{QualityTable, ScaleTable};
//!
//! let chord = build_chord("C", "maj7", &QualityTable::default()).unwrap();
//! assert_eq!(chord.pitch_classes().to_vec(), vec![0, 4, 7, 11]);
//!
//! // First inversion: E in the bass, same sonority.
//! let inverted = chord.invert(1);
//! assert_eq!(inverted.bass().to_string(), "E");
//! assert_eq!(inverted.pitch_classes(), chord.pitch_classes());
//!
//! // Mode 1 of C major is D Dorian, sharing the parent pitch-class set.
//! let c_major = build_scale("C", "major", &ScaleTable::default()).unwrap();
//! let dorian = c_major.mode(1);
//! assert_eq!(dorian.tonic().to_string(), "D");
//! assert_eq!(dorian.pitch_classes(), c_major.pitch_classes());
//! ```
//!
//! # Module Structure
//!
//! - [`pitch`]: pitch-class arithmetic, pitch-class sets, note spelling
//! - [`interval`]: named intervals and interval inversion
//! - [`chord`]: chord formulas, construction, inversion
//! - [`scale`]: scale formulas, modes, degree spelling
//! - [`tables`]: injectable quality/scale configuration tables
//! - [`symbol`]: parsing of standard theory notation
//! - [`freq`]: MIDI and frequency conversion helpers
//! - [`error`]: the error taxonomy

pub mod chord;
pub mod error;
pub mod freq;
pub mod interval;
pub mod pitch;
pub mod scale;
pub mod symbol;
pub mod tables;

// Re-export the types most callers need at the crate root.
pub use chord::{Chord, ChordDescription, ChordFormula, SoundingNote};
pub use error::TheoryError;
pub use interval::{DirectedInterval, Direction, Interval};
pub use pitch::{Key, Note, NoteLetter, PitchClass, PitchClassSet, Spelling};
pub use scale::{Scale, ScaleDescription, ScaleFormula};
pub use symbol::{build_chord, build_scale, parse_chord_symbol, parse_note};
pub use tables::{QualityTable, ScaleTable};

/// Crate version for embedding applications.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
