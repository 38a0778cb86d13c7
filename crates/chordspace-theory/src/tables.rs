//! Injectable chord-quality and scale-formula tables.
//!
//! The canonical quality tables are configuration data, not engine logic:
//! both tables are plain name-to-offsets mappings that callers can replace,
//! extend, or load from JSON without touching any theory code. The crate
//! ships documented defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chord::{validate_offsets, ChordFormula};
use crate::error::TheoryError;
use crate::scale::{validate_scale_offsets, ScaleFormula};

/// Chord qualities by symbolic name. Keys are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityTable {
    entries: BTreeMap<String, Vec<u8>>,
}

impl QualityTable {
    /// A table with no entries, for callers that supply everything.
    pub fn empty() -> Self {
        QualityTable {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces a quality; the offsets are validated first.
    pub fn insert(&mut self, name: impl Into<String>, offsets: Vec<u8>) -> Result<(), TheoryError> {
        let name = name.into().to_ascii_lowercase();
        validate_offsets(&name, &offsets)?;
        self.entries.insert(name, offsets);
        Ok(())
    }

    /// Resolves a quality symbol to a validated formula.
    ///
    /// Lookup is case-insensitive; fails with [`TheoryError::UnknownQuality`].
    pub fn formula(&self, symbol: &str) -> Result<ChordFormula, TheoryError> {
        let key = symbol.to_ascii_lowercase();
        let offsets = self
            .entries
            .get(&key)
            .ok_or_else(|| TheoryError::UnknownQuality {
                symbol: symbol.to_string(),
            })?;
        ChordFormula::new(key, offsets.clone())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&symbol.to_ascii_lowercase())
    }

    /// All quality names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every entry as a validated formula, in name order. The usual way to
    /// assemble a branching candidate pool.
    pub fn formulas(&self) -> Result<Vec<ChordFormula>, TheoryError> {
        self.entries
            .iter()
            .map(|(name, offsets)| ChordFormula::new(name.clone(), offsets.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads and validates a table from a JSON object of name-to-offsets.
    pub fn from_json(json: &str) -> Result<Self, TheoryError> {
        let table: QualityTable =
            serde_json::from_str(json).map_err(|e| TheoryError::InvalidTable {
                message: e.to_string(),
            })?;
        table.validate()?;
        Ok(table)
    }

    /// Re-checks every entry; deserialized tables go through this.
    pub fn validate(&self) -> Result<(), TheoryError> {
        for (name, offsets) in &self.entries {
            validate_offsets(name, offsets)?;
        }
        Ok(())
    }
}

impl Default for QualityTable {
    /// Triads, sixths, sevenths, and the common extensions.
    fn default() -> Self {
        let entries = [
            ("maj", vec![0, 4, 7]),
            ("m", vec![0, 3, 7]),
            ("min", vec![0, 3, 7]),
            ("dim", vec![0, 3, 6]),
            ("aug", vec![0, 4, 8]),
            ("sus2", vec![0, 2, 7]),
            ("sus4", vec![0, 5, 7]),
            ("5", vec![0, 7]),
            ("6", vec![0, 4, 7, 9]),
            ("m6", vec![0, 3, 7, 9]),
            ("7", vec![0, 4, 7, 10]),
            ("maj7", vec![0, 4, 7, 11]),
            ("m7", vec![0, 3, 7, 10]),
            ("mmaj7", vec![0, 3, 7, 11]),
            ("dim7", vec![0, 3, 6, 9]),
            ("m7b5", vec![0, 3, 6, 10]),
            ("aug7", vec![0, 4, 8, 10]),
            ("add9", vec![0, 4, 7, 14]),
            ("9", vec![0, 4, 7, 10, 14]),
            ("maj9", vec![0, 4, 7, 11, 14]),
            ("m9", vec![0, 3, 7, 10, 14]),
            ("11", vec![0, 4, 7, 10, 14, 17]),
            ("13", vec![0, 4, 7, 10, 14, 17, 21]),
        ];
        QualityTable {
            entries: entries
                .into_iter()
                .map(|(name, offsets)| (name.to_string(), offsets))
                .collect(),
        }
    }
}

/// Scale formulas by symbolic name. Keys are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleTable {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ScaleTable {
    pub fn empty() -> Self {
        ScaleTable {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces a scale; the offsets are validated first.
    pub fn insert(&mut self, name: impl Into<String>, offsets: Vec<u8>) -> Result<(), TheoryError> {
        let name = name.into().to_ascii_lowercase();
        validate_scale_offsets(&name, &offsets)?;
        self.entries.insert(name, offsets);
        Ok(())
    }

    /// Resolves a scale symbol to a validated formula.
    ///
    /// Lookup is case-insensitive; fails with [`TheoryError::UnknownScale`].
    pub fn formula(&self, symbol: &str) -> Result<ScaleFormula, TheoryError> {
        let key = symbol.to_ascii_lowercase();
        let offsets = self
            .entries
            .get(&key)
            .ok_or_else(|| TheoryError::UnknownScale {
                symbol: symbol.to_string(),
            })?;
        ScaleFormula::new(key, offsets.clone())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&symbol.to_ascii_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads and validates a table from a JSON object of name-to-offsets.
    pub fn from_json(json: &str) -> Result<Self, TheoryError> {
        let table: ScaleTable =
            serde_json::from_str(json).map_err(|e| TheoryError::InvalidTable {
                message: e.to_string(),
            })?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), TheoryError> {
        for (name, offsets) in &self.entries {
            validate_scale_offsets(name, offsets)?;
        }
        Ok(())
    }
}

impl Default for ScaleTable {
    /// The diatonic modes, the minor variants, and the common symmetric and
    /// pentatonic scales.
    fn default() -> Self {
        let entries = [
            ("major", vec![0, 2, 4, 5, 7, 9, 11]),
            ("minor", vec![0, 2, 3, 5, 7, 8, 10]),
            ("harmonic_minor", vec![0, 2, 3, 5, 7, 8, 11]),
            ("melodic_minor", vec![0, 2, 3, 5, 7, 9, 11]),
            ("ionian", vec![0, 2, 4, 5, 7, 9, 11]),
            ("dorian", vec![0, 2, 3, 5, 7, 9, 10]),
            ("phrygian", vec![0, 1, 3, 5, 7, 8, 10]),
            ("lydian", vec![0, 2, 4, 6, 7, 9, 11]),
            ("mixolydian", vec![0, 2, 4, 5, 7, 9, 10]),
            ("aeolian", vec![0, 2, 3, 5, 7, 8, 10]),
            ("locrian", vec![0, 1, 3, 5, 6, 8, 10]),
            ("pentatonic_major", vec![0, 2, 4, 7, 9]),
            ("pentatonic_minor", vec![0, 3, 5, 7, 10]),
            ("blues", vec![0, 3, 5, 6, 7, 10]),
            ("whole_tone", vec![0, 2, 4, 6, 8, 10]),
            ("chromatic", vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
        ];
        ScaleTable {
            entries: entries
                .into_iter()
                .map(|(name, offsets)| (name.to_string(), offsets))
                .collect(),
        }
    }
}
