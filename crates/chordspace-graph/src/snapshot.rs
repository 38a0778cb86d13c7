//! Structured map snapshots for rendering collaborators.
//!
//! The snapshot is the only thing an embedding UI needs to draw the
//! mind-map; node and edge order is deterministic (identifier order), and
//! the whole record round-trips through serde so the collaborator owns
//! persistence if it wants any.

use serde::{Deserialize, Serialize};

/// A full view of an explored map: `{nodes, edges, current}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    /// Identifier of the current position.
    pub current: String,
}

impl MapSnapshot {
    /// Serializes to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes to a JSON value, for embedding into larger documents.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// One rendered vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    /// Display label, e.g. `Cmaj7` or `Cmaj7/E`.
    pub label: String,
    pub root: String,
    pub quality: String,
    pub inversion: usize,
    pub pitch_classes: Vec<u8>,
}

/// One rendered transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: String,
    pub to: String,
    /// The pivot notes the branch preserved.
    pub pivots: Vec<u8>,
    pub score: f64,
}
