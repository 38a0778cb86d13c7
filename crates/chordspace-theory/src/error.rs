//! Error types for the theory core.

use thiserror::Error;

/// Errors produced while constructing or parsing theory entities.
///
/// Every variant is a local, recoverable condition: construction errors block
/// entity creation and nothing partially built is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("invalid formula '{name}': {message}")]
    InvalidFormula { name: String, message: String },
    #[error("pitch class {pc} has two equally valid spellings; supply a preference or use the sharp default")]
    SpellingAmbiguous { pc: u8 },
    #[error("invalid note symbol '{symbol}'")]
    InvalidNoteSymbol { symbol: String },
    #[error("unknown chord quality '{symbol}'")]
    UnknownQuality { symbol: String },
    #[error("unknown scale '{symbol}'")]
    UnknownScale { symbol: String },
    #[error("bass note '{bass}' is not a chord tone of '{symbol}'")]
    BassNotInChord { symbol: String, bass: String },
    #[error("invalid table: {message}")]
    InvalidTable { message: String },
}

impl TheoryError {
    /// Returns a stable error code for embedding applications.
    pub fn code(&self) -> &'static str {
        match self {
            TheoryError::InvalidFormula { .. } => "THEORY_001",
            TheoryError::SpellingAmbiguous { .. } => "THEORY_002",
            TheoryError::InvalidNoteSymbol { .. } => "THEORY_003",
            TheoryError::UnknownQuality { .. } => "THEORY_004",
            TheoryError::UnknownScale { .. } => "THEORY_005",
            TheoryError::BassNotInChord { .. } => "THEORY_006",
            TheoryError::InvalidTable { .. } => "THEORY_007",
        }
    }
}
