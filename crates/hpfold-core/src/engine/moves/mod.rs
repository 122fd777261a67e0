//! Candidate generation for growing a fold and for perturbing a complete one.

pub mod pull;

use crate::core::models::conformation::Conformation;
use crate::core::models::lattice::{self, Coordinate};
use tracing::trace;

pub use pull::{PullMove, PullMoveError, PullSide};

/// Coordinates the next residue may occupy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveSet {
    /// Never empty; ordered `+x, -x, +y, -y, +z, -z` relative to the last residue.
    Moves(Vec<Coordinate>),
    DeadEnd,
}

impl MoveSet {
    fn from_candidates(candidates: Vec<Coordinate>) -> Self {
        if candidates.is_empty() {
            MoveSet::DeadEnd
        } else {
            MoveSet::Moves(candidates)
        }
    }

    pub fn is_dead_end(&self) -> bool {
        matches!(self, MoveSet::DeadEnd)
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        match self {
            MoveSet::Moves(moves) => moves,
            MoveSet::DeadEnd => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_dead_end()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Free lattice neighbours of the last placed residue.
    pub fn legal_moves(&self, conformation: &Conformation) -> MoveSet {
        if conformation.is_complete() {
            return MoveSet::DeadEnd;
        }
        let candidates = lattice::neighbors(&conformation.last_position(), conformation.dimension())
            .filter(|candidate| !conformation.is_occupied(candidate))
            .collect();
        MoveSet::from_candidates(candidates)
    }

    /// Legal moves minus those that would leave the following residue nowhere to go.
    ///
    /// A move that places the final residue is never pruned.
    pub fn safe_moves(&self, conformation: &Conformation) -> MoveSet {
        let legal = match self.legal_moves(conformation) {
            MoveSet::Moves(moves) => moves,
            MoveSet::DeadEnd => return MoveSet::DeadEnd,
        };
        if conformation.len() + 1 == conformation.sequence().len() {
            return MoveSet::Moves(legal);
        }

        let dimension = conformation.dimension();
        let before = legal.len();
        let safe: Vec<Coordinate> = legal
            .into_iter()
            .filter(|candidate| {
                lattice::neighbors(candidate, dimension).any(|n| !conformation.is_occupied(&n))
            })
            .collect();
        if safe.len() < before {
            trace!(
                pruned = before - safe.len(),
                residue = conformation.len(),
                "Pruned dead-end moves."
            );
        }
        MoveSet::from_candidates(safe)
    }

    pub fn generate(&self, conformation: &Conformation, prune_dead_ends: bool) -> MoveSet {
        if prune_dead_ends {
            self.safe_moves(conformation)
        } else {
            self.legal_moves(conformation)
        }
    }

    /// All pull moves of residue `index` on a complete or partial fold.
    pub fn pull_moves(&self, conformation: &Conformation, index: usize) -> Vec<PullMove> {
        pull::candidates(conformation, index)
    }

    /// Applies `pull` to a copy of `conformation`; the input is never modified.
    pub fn apply_pull(
        &self,
        conformation: &Conformation,
        pull: &PullMove,
    ) -> Result<Conformation, PullMoveError> {
        pull::apply(conformation, pull)
    }
}
