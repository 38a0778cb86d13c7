//! Error types for the exploration graph.

use thiserror::Error;

/// Errors produced by session-map operations.
///
/// Both variants are recoverable misuse or safety-limit conditions; a failed
/// operation leaves the [`crate::map::ExploredMap`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown node '{id}': not in the map or not connected to the current position")]
    UnknownNode { id: String },
    #[error("empty pivot set over {candidates} candidates exceeds the safety limit of {limit}")]
    EmptyPivotSet { candidates: usize, limit: usize },
}

impl GraphError {
    /// Returns a stable error code for embedding applications.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::UnknownNode { .. } => "GRAPH_001",
            GraphError::EmptyPivotSet { .. } => "GRAPH_002",
        }
    }
}
