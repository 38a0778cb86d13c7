//! The session-scoped exploration map and the branch operation.
//!
//! An [`ExploredMap`] is a directed graph of visited chords with a current
//! position. Edges are computed on demand: `branch` enumerates a bounded
//! candidate pool (|formulas| x |roots|), filters by pivot notes, scores,
//! ranks, and only then mutates the map, so a failed call never leaves a
//! partial insertion behind. Node and edge indexes are ordered maps keyed by
//! content-derived identifiers, which makes revisits and repeated branches
//! idempotent.

use std::collections::BTreeMap;

use chordspace_theory::{Chord, ChordFormula, PitchClass, PitchClassSet, QualityTable, TheoryError};

use crate::config::{EngineConfig, ScoreWeights};
use crate::error::GraphError;
use crate::node::{derive_node_id, ChordGraphNode, NodeId};
use crate::score::score_candidate;
use crate::snapshot::{EdgeSnapshot, MapSnapshot, NodeSnapshot};

/// The bounded candidate space a branch enumerates: every formula applied to
/// every root. Defaults to all 12 roots.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    formulas: Vec<ChordFormula>,
    roots: Vec<PitchClass>,
}

impl CandidatePool {
    pub fn new(formulas: Vec<ChordFormula>, roots: Vec<PitchClass>) -> Self {
        CandidatePool { formulas, roots }
    }

    /// Every formula over the full 12-tone root space.
    pub fn over_all_roots(formulas: Vec<ChordFormula>) -> Self {
        CandidatePool {
            formulas,
            roots: (0..12).map(PitchClass::new).collect(),
        }
    }

    /// The whole quality table over all 12 roots.
    pub fn from_table(table: &QualityTable) -> Result<Self, TheoryError> {
        Ok(CandidatePool::over_all_roots(table.formulas()?))
    }

    pub fn formulas(&self) -> &[ChordFormula] {
        &self.formulas
    }

    pub fn roots(&self) -> &[PitchClass] {
        &self.roots
    }

    /// Candidate count before any pivot filtering.
    pub fn unfiltered_len(&self) -> usize {
        self.formulas.len() * self.roots.len()
    }
}

/// A scored transition stored in the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    pivots: PitchClassSet,
    score: f64,
}

impl Edge {
    pub fn from_id(&self) -> &NodeId {
        &self.from
    }

    pub fn to_id(&self) -> &NodeId {
        &self.to
    }

    /// The pivot set the branch was filtered on.
    pub fn pivots(&self) -> PitchClassSet {
        self.pivots
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// One ranked branch result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub node_id: NodeId,
    pub chord: Chord,
    pub score: f64,
    /// Pitch classes shared with the branch source.
    pub shared_notes: usize,
}

/// A session's explorable mind-map of chords.
///
/// Created positioned on a starting chord; mutated only by [`branch`] and
/// [`move_to`]; dropped at session end. One map per session, no shared state.
///
/// [`branch`]: ExploredMap::branch
/// [`move_to`]: ExploredMap::move_to
#[derive(Debug, Clone)]
pub struct ExploredMap {
    config: EngineConfig,
    nodes: BTreeMap<NodeId, ChordGraphNode>,
    edges: BTreeMap<(NodeId, NodeId), Edge>,
    current: NodeId,
}

impl ExploredMap {
    /// Opens a session positioned on `chord`.
    pub fn start_at(chord: Chord, config: EngineConfig) -> ExploredMap {
        let node = ChordGraphNode::new(chord, config.identity);
        let current = node.id().clone();
        let mut nodes = BTreeMap::new();
        nodes.insert(current.clone(), node);
        ExploredMap {
            config,
            nodes,
            edges: BTreeMap::new(),
            current,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the scoring weights for subsequent branches.
    ///
    /// Re-branching an already-connected pair afterwards overwrites the
    /// stored edge score (last write wins).
    pub fn set_weights(&mut self, weights: ScoreWeights) {
        self.config.weights = weights;
    }

    /// The node the session is positioned on.
    pub fn current(&self) -> &ChordGraphNode {
        // The current id always points at a stored node.
        &self.nodes[&self.current]
    }

    pub fn node(&self, id: &NodeId) -> Option<&ChordGraphNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ChordGraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The full pitch-class set of a chord; callers pick a subset of this as
    /// the pivot to branch on.
    pub fn pivot_notes(&self, chord: &Chord) -> PitchClassSet {
        chord.pitch_classes()
    }

    /// Enumerates, scores, and ranks the neighbors of `from` that preserve
    /// every pivot note, inserting the surviving nodes and edges.
    ///
    /// The candidate space is `pool.unfiltered_len()` chords; candidates
    /// whose sonority equals the source are excluded unless
    /// `allow_self_loop` is set. Results are ordered by score descending,
    /// ties broken by fewer pitch classes, then smaller circular root
    /// distance from the source root, then formula name. One entry per node
    /// identifier.
    ///
    /// Re-branching with identical arguments grows nothing: nodes and edges
    /// are keyed by content, and an existing edge only has its score
    /// overwritten (last write wins, so re-scoring with different weights is
    /// possible).
    ///
    /// Does not move the current position.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when `from` is not in the map;
    /// [`GraphError::EmptyPivotSet`] when `pivots` is empty and the
    /// unfiltered candidate count exceeds the configured safety limit. The
    /// map is unchanged on error.
    pub fn branch(
        &mut self,
        from: &NodeId,
        pivots: PitchClassSet,
        pool: &CandidatePool,
    ) -> Result<Vec<RankedCandidate>, GraphError> {
        let from_node = self.nodes.get(from).ok_or_else(|| GraphError::UnknownNode {
            id: from.to_string(),
        })?;
        let unfiltered = pool.unfiltered_len();
        if pivots.is_empty() && unfiltered > self.config.candidate_limit {
            return Err(GraphError::EmptyPivotSet {
                candidates: unfiltered,
                limit: self.config.candidate_limit,
            });
        }

        let source_set = from_node.chord().pitch_classes();
        let source_root = from_node.chord().root().pitch_class();

        let mut ranked: Vec<RankedCandidate> = Vec::new();
        for formula in pool.formulas() {
            for &root in pool.roots() {
                let chord = Chord::build(root.spell_default(), formula.clone());
                let candidate_set = chord.pitch_classes();
                if !candidate_set.is_superset(pivots) {
                    continue;
                }
                if !self.config.allow_self_loop && candidate_set == source_set {
                    continue;
                }
                let score =
                    score_candidate(&self.config.weights, pivots, source_set, candidate_set);
                ranked.push(RankedCandidate {
                    node_id: derive_node_id(&chord, self.config.identity),
                    shared_notes: source_set.intersection(candidate_set).len(),
                    chord,
                    score,
                });
            }
        }

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| {
                    a.chord
                        .pitch_classes()
                        .len()
                        .cmp(&b.chord.pitch_classes().len())
                })
                .then_with(|| {
                    let near_a = source_root.circular_distance(a.chord.root().pitch_class());
                    let near_b = source_root.circular_distance(b.chord.root().pitch_class());
                    near_a.cmp(&near_b)
                })
                .then_with(|| a.chord.formula().name().cmp(b.chord.formula().name()))
                .then_with(|| {
                    a.chord
                        .root()
                        .pitch_class()
                        .value()
                        .cmp(&b.chord.root().pitch_class().value())
                })
        });
        // Two pool entries can map to one node (e.g. quality aliases under
        // sonority identity); keep the best-ranked representative.
        let mut seen = std::collections::BTreeSet::new();
        ranked.retain(|candidate| seen.insert(candidate.node_id.clone()));

        // All filtering and ranking succeeded; mutate the map in one pass.
        let identity = self.config.identity;
        for candidate in &ranked {
            self.nodes
                .entry(candidate.node_id.clone())
                .or_insert_with(|| ChordGraphNode::new(candidate.chord.clone(), identity));
            self.edges.insert(
                (from.clone(), candidate.node_id.clone()),
                Edge {
                    from: from.clone(),
                    to: candidate.node_id.clone(),
                    pivots,
                    score: candidate.score,
                },
            );
        }
        Ok(ranked)
    }

    /// Repositions the session on a node reachable from the current one.
    ///
    /// An edge in either direction admits the move; traversing an edge
    /// backwards is what makes backtracking out of a leaf possible.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when the node is absent or shares no edge
    /// with the current position.
    pub fn move_to(&mut self, id: &NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(id) {
            return Err(GraphError::UnknownNode { id: id.to_string() });
        }
        let connected = self
            .edges
            .contains_key(&(self.current.clone(), id.clone()))
            || self.edges.contains_key(&(id.clone(), self.current.clone()));
        if !connected {
            return Err(GraphError::UnknownNode { id: id.to_string() });
        }
        self.current = id.clone();
        Ok(())
    }

    /// A structured, deterministic view of the whole map for rendering.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            nodes: self
                .nodes
                .values()
                .map(|node| NodeSnapshot {
                    id: node.id().to_string(),
                    label: node.label().to_string(),
                    root: node.chord().root().to_string(),
                    quality: node.chord().formula().name().to_string(),
                    inversion: node.chord().inversion(),
                    pitch_classes: node.chord().pitch_classes().to_vec(),
                })
                .collect(),
            edges: self
                .edges
                .values()
                .map(|edge| EdgeSnapshot {
                    from: edge.from.to_string(),
                    to: edge.to.to_string(),
                    pivots: edge.pivots.to_vec(),
                    score: edge.score,
                })
                .collect(),
            current: self.current.to_string(),
        }
    }
}
