//! Pool - bookkeeping record of a generated population
//!
//! Holds participants in assembly order and an edge list keyed by
//! participant ID. The matrix math never reads from here; the edge list
//! exists for export.

use serde::{Deserialize, Serialize};

use super::participant::{Altruist, Pair, ParticipantId};
use crate::matrix::EdgeMatrix;

/// Directed edge `(source, target)`: the donor of `source` gives to the
/// patient of `target`.
pub type PoolEdge = (ParticipantId, ParticipantId);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pairs: Vec<Pair>,
    altruists: Vec<Altruist>,
    edges: Vec<PoolEdge>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pair(&mut self, pair: Pair) {
        self.pairs.push(pair);
    }

    pub fn add_altruist(&mut self, altruist: Altruist) {
        self.altruists.push(altruist);
    }

    pub fn add_edge(&mut self, source: ParticipantId, target: ParticipantId) {
        self.edges.push((source, target));
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn altruists(&self) -> &[Altruist] {
        &self.altruists
    }

    pub fn edges(&self) -> &[PoolEdge] {
        &self.edges
    }

    /// Number of participants (pairs + altruists).
    pub fn len(&self) -> usize {
        self.pairs.len() + self.altruists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Participant IDs in assembly order, i.e. matrix index order.
    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.pairs
            .iter()
            .map(Pair::id)
            .chain(self.altruists.iter().map(Altruist::id))
            .collect()
    }

    /// Replace the edge list with the 1-cells of `edges`.
    ///
    /// Cell `(patient_row, donor_col)` becomes the edge
    /// `(id(donor_col), id(patient_row))`. Dummy altruist edges are
    /// recorded like any other. Edges are appended in row-major order.
    ///
    /// The matrix side must equal [`Pool::len`]; cells outside the pool
    /// are ignored.
    pub fn record_edges(&mut self, edges: &EdgeMatrix) {
        let ids = self.participant_ids();
        self.edges.clear();
        for (patient, donor) in edges.iter_edges() {
            if let (Some(&source), Some(&target)) = (ids.get(donor), ids.get(patient)) {
                self.edges.push((source, target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;

    fn sample_pool() -> Pool {
        let mut pool = Pool::new();
        pool.add_pair(Pair::new(0, BloodType::A, BloodType::B, false, 0.05, false).unwrap());
        pool.add_pair(Pair::new(1, BloodType::B, BloodType::A, false, 0.45, false).unwrap());
        pool.add_altruist(Altruist::new(2, BloodType::O));
        pool
    }

    #[test]
    fn test_participant_ids_pairs_first() {
        let pool = sample_pool();
        assert_eq!(pool.participant_ids(), vec![0, 1, 2]);
        assert_eq!(pool.len(), 3);
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_record_edges_uses_donor_as_source() {
        let mut pool = sample_pool();
        let mut matrix = EdgeMatrix::zeros(3);
        // Donor of pair 1 gives to patient of pair 0
        matrix.set(0, 1, 1);
        // Dummy edge from pair 0 into the altruist slot
        matrix.set(2, 0, 1);

        pool.add_edge(9, 9);
        pool.record_edges(&matrix);

        assert_eq!(pool.edges(), &[(1, 0), (0, 2)]);
    }
}
