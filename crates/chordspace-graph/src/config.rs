//! Engine configuration: scoring weights, node identity, safety limits.
//!
//! Everything here is caller-supplied configuration with documented defaults;
//! the engine never hardcodes a weight or limit a caller cannot override.

use serde::{Deserialize, Serialize};

/// Default safety limit for unfiltered candidate enumeration.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 500;

/// Weights of the pleasantness score
/// `w1 * |pivots| / |candidate| - w2 * voice_leading + w3 * shared`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// w1: reward for pivot coverage relative to candidate size.
    pub pivot_coverage: f64,
    /// w2: penalty per semitone of voice-leading cost.
    pub voice_leading: f64,
    /// w3: reward per pitch class shared with the source chord.
    pub shared_notes: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            pivot_coverage: 2.0,
            voice_leading: 1.0,
            shared_notes: 3.0,
        }
    }
}

/// How node identifiers treat chords with identical sonority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIdentity {
    /// Distinct nodes per (sonority, quality name, inversion).
    #[default]
    Structural,
    /// Merge every chord that sounds the same pitch-class set.
    Sonority,
}

/// Session configuration, fixed when the map is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    pub identity: NodeIdentity,
    /// Admit candidates whose sonority equals the branch source.
    pub allow_self_loop: bool,
    /// Reject an empty pivot set when the unfiltered candidate count would
    /// exceed this limit.
    pub candidate_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weights: ScoreWeights::default(),
            identity: NodeIdentity::default(),
            allow_self_loop: false,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn documented_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.weights.pivot_coverage, 2.0);
        assert_eq!(config.weights.voice_leading, 1.0);
        assert_eq!(config.weights.shared_notes, 3.0);
        assert_eq!(config.identity, NodeIdentity::Structural);
        assert!(!config.allow_self_loop);
        assert_eq!(config.candidate_limit, 500);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"weights": {"shared_notes": 5.0}}"#).unwrap();
        assert_eq!(config.weights.shared_notes, 5.0);
        assert_eq!(config.weights.pivot_coverage, 2.0);
        assert_eq!(config.candidate_limit, 500);
    }

    #[test]
    fn identity_serializes_snake_case() {
        let json = serde_json::to_string(&NodeIdentity::Sonority).unwrap();
        assert_eq!(json, "\"sonority\"");
    }
}
