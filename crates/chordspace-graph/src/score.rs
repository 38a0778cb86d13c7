//! The pleasantness scoring function.
//!
//! Deterministic and explainable: a weighted sum of pivot coverage, a
//! voice-leading penalty, and a shared-note reward. No statistics, no
//! randomness; callers substitute their own [`ScoreWeights`] to re-rank.

use chordspace_theory::PitchClassSet;

use crate::config::ScoreWeights;

/// Greedy voice-leading cost from a source sonority to a candidate.
///
/// Each source pitch class is paired with its nearest candidate pitch class
/// by circular semitone distance and the distances are summed. This is a
/// nearest-neighbor approximation, not an optimal transport pairing: two
/// source tones may claim the same candidate tone. Cheap, deterministic, and
/// good enough to order neighbors by how far the hand has to move.
pub fn voice_leading_cost(source: PitchClassSet, candidate: PitchClassSet) -> u32 {
    source
        .iter()
        .map(|s| {
            candidate
                .iter()
                .map(|c| s.circular_distance(c) as u32)
                .min()
                .unwrap_or(0)
        })
        .sum()
}

/// Scores a candidate against the branch source:
/// `w1 * |pivots| / |candidate| - w2 * voice_leading + w3 * |source ∩ candidate|`.
pub fn score_candidate(
    weights: &ScoreWeights,
    pivots: PitchClassSet,
    source: PitchClassSet,
    candidate: PitchClassSet,
) -> f64 {
    let coverage = pivots.len() as f64 / candidate.len() as f64;
    let movement = voice_leading_cost(source, candidate) as f64;
    let shared = source.intersection(candidate).len() as f64;
    weights.pivot_coverage * coverage - weights.voice_leading * movement
        + weights.shared_notes * shared
}
