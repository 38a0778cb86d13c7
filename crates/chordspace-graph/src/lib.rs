//! Chordspace Exploration Graph - Pivot-Note Branching and Chord Ranking
//!
//! This crate turns the theory core into an explorable "chord space": given
//! a chord, it enumerates and ranks neighboring chords that preserve a chosen
//! set of pivot notes, and maintains a session-scoped, cycle-aware map of
//! everything visited.
//!
//! # Design
//!
//! - **Lazy expansion**: the full chord graph is never materialized. A branch
//!   enumerates only the bounded candidate pool the caller passes
//!   (|formulas| x |roots| chords) and inserts the survivors.
//! - **Content-derived identity**: nodes are keyed by a BLAKE3 digest of the
//!   chord's pitch-class set (plus quality and inversion under structural
//!   identity), so revisiting a chord reuses its node and repeated branches
//!   are idempotent.
//! - **Deterministic, explainable ranking**: a weighted sum of pivot
//!   coverage, greedy voice-leading cost, and shared notes, with a total
//!   tie-break order. Weights are caller configuration, not code.
//!
//! # Example
//!
//! ```
//! use chordspace_graph::{CandidatePool, EngineConfig, ExploredMap};
//! use chordspace_theory::{build_chord, PitchClass, PitchClassSet, QualityTable};
//!
//! let table = QualityTable::default();
//! let c_major = build_chord("C", "maj", &table).unwrap();
//!
//! let mut map = ExploredMap::start_at(c_major.clone(), EngineConfig::default());
//! let from = map.current().id().clone();
//!
//! // Branch on the pivot notes C and E.
//! let pivots: PitchClassSet = [0, 4].iter().map(|&v| PitchClass::new(v)).collect();
//! let pool = CandidatePool::from_table(&table).unwrap();
//! let ranked = map.branch(&from, pivots, &pool).unwrap();
//!
//! // Every neighbor preserves both pivot notes.
//! assert!(ranked.iter().all(|c| c.chord.pitch_classes().is_superset(pivots)));
//!
//! // Follow the best-ranked edge and render the map.
//! let best = ranked[0].node_id.clone();
//! map.move_to(&best).unwrap();
//! let snapshot = map.snapshot();
//! assert_eq!(snapshot.current, best.to_string());
//! ```

pub mod config;
pub mod error;
pub mod map;
pub mod node;
pub mod score;
pub mod snapshot;

// Re-export the session API at the crate root.
pub use config::{EngineConfig, NodeIdentity, ScoreWeights, DEFAULT_CANDIDATE_LIMIT};
pub use error::GraphError;
pub use map::{CandidatePool, Edge, ExploredMap, RankedCandidate};
pub use node::{derive_node_id, ChordGraphNode, NodeId};
pub use score::{score_candidate, voice_leading_cost};
pub use snapshot::{EdgeSnapshot, MapSnapshot, NodeSnapshot};

/// Crate version for embedding applications.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
