//! Graph node identity.
//!
//! Nodes are indexed by a content-derived key rather than object identity:
//! the BLAKE3 digest of a canonical byte string built from the chord's
//! pitch-class set and, under [`NodeIdentity::Structural`], its quality name
//! and inversion. Revisiting a chord always reproduces the same identifier,
//! which is what makes cycle handling and idempotent map growth trivial.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use chordspace_theory::Chord;

use crate::config::NodeIdentity;

/// Stable identifier of a graph node: a 64-character lowercase hex digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the canonical identifier of a chord under an identity mode.
///
/// The hashed string is unambiguous: fields are labeled and separated, so
/// `pcs:0.4.7|quality:maj|inv:0` can never collide with a different
/// structural key.
pub fn derive_node_id(chord: &Chord, identity: NodeIdentity) -> NodeId {
    let pcs = chord
        .pitch_classes()
        .to_vec()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(".");
    let canonical = match identity {
        NodeIdentity::Sonority => format!("pcs:{}", pcs),
        NodeIdentity::Structural => format!(
            "pcs:{}|quality:{}|inv:{}",
            pcs,
            chord.formula().name(),
            chord.inversion()
        ),
    };
    NodeId(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// A visited chord wrapped as a graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordGraphNode {
    id: NodeId,
    chord: Chord,
    label: String,
}

impl ChordGraphNode {
    pub(crate) fn new(chord: Chord, identity: NodeIdentity) -> Self {
        let id = derive_node_id(&chord, identity);
        let label = chord.to_string();
        ChordGraphNode { id, chord, label }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// Display label (`Cmaj7`, `Am/C`), for rendering collaborators.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use chordspace_theory::{build_chord, QualityTable};

    use super::*;

    fn table() -> QualityTable {
        QualityTable::default()
    }

    #[test]
    fn identifiers_are_stable_hex() {
        let chord = build_chord("C", "maj7", &table()).unwrap();
        let a = derive_node_id(&chord, NodeIdentity::Structural);
        let b = derive_node_id(&chord, NodeIdentity::Structural);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn structural_identity_keeps_inversions_distinct() {
        let chord = build_chord("C", "maj", &table()).unwrap();
        let root_position = derive_node_id(&chord, NodeIdentity::Structural);
        let first = derive_node_id(&chord.invert(1), NodeIdentity::Structural);
        assert_ne!(root_position, first);
    }

    #[test]
    fn sonority_identity_merges_inversions_and_spellings() {
        let c_sharp = build_chord("C#", "maj", &table()).unwrap();
        let d_flat = build_chord("Db", "maj", &table()).unwrap();
        assert_eq!(
            derive_node_id(&c_sharp, NodeIdentity::Sonority),
            derive_node_id(&d_flat.invert(2), NodeIdentity::Sonority)
        );
        // Same sonority, different quality name, still merged.
        let am7 = build_chord("A", "m7", &table()).unwrap();
        let c6 = build_chord("C", "6", &table()).unwrap();
        assert_eq!(
            derive_node_id(&am7, NodeIdentity::Sonority),
            derive_node_id(&c6, NodeIdentity::Sonority)
        );
    }
}
