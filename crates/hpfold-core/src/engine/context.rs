use super::moves::{MoveGenerator, MoveSet};
use crate::core::forcefield::scoring::EnergyScorer;
use crate::core::models::conformation::Conformation;
use crate::core::models::lattice::Dimension;
use crate::core::models::residue::Sequence;

/// Everything a strategy needs to build and evaluate folds of one sequence.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub sequence: &'a Sequence,
    pub dimension: Dimension,
    pub scorer: &'a EnergyScorer,
    pub moves: MoveGenerator,
}

impl<'a> SearchContext<'a> {
    pub fn new(sequence: &'a Sequence, dimension: Dimension, scorer: &'a EnergyScorer) -> Self {
        Self {
            sequence,
            dimension,
            scorer,
            moves: MoveGenerator::new(),
        }
    }

    /// A fresh two-residue seed.
    pub fn seed(&self) -> Conformation {
        Conformation::new(self.sequence.clone(), self.dimension)
    }

    pub fn generate_moves(&self, conformation: &Conformation, prune_dead_ends: bool) -> MoveSet {
        self.moves.generate(conformation, prune_dead_ends)
    }

    #[inline]
    pub fn score(&self, conformation: &Conformation) -> i32 {
        self.scorer.score(conformation)
    }
}
