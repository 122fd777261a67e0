use crate::core::models::conformation::{Conformation, ConformationError};
use crate::core::models::lattice::{self, Coordinate};
use thiserror::Error;

/// Which chain neighbour follows the moved residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullSide {
    /// Residue `index + 1` stays put and residues `index - 1, index - 2, ...` are pulled.
    Preceding,
    /// Residue `index - 1` stays put and residues `index + 1, index + 2, ...` are pulled.
    Following,
}

impl PullSide {
    fn anchor(self, index: usize, len: usize) -> Option<usize> {
        match self {
            PullSide::Preceding => (index + 1 < len).then_some(index + 1),
            PullSide::Following => index.checked_sub(1),
        }
    }

    fn pulled(self, index: usize, len: usize) -> Option<usize> {
        match self {
            PullSide::Preceding => index.checked_sub(1),
            PullSide::Following => (index + 1 < len).then_some(index + 1),
        }
    }
}

/// Moves residue `index` to the free diagonal `target`; the pulled neighbour goes to `pivot`
/// when it loses contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PullMove {
    pub index: usize,
    pub target: Coordinate,
    pub pivot: Coordinate,
    pub side: PullSide,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PullMoveError {
    #[error("Pull move of residue {index} does not apply to this fold: {reason}")]
    NotApplicable { index: usize, reason: &'static str },
    #[error("Pull move of residue {index} broke the chain: {source}")]
    PropagationFailed {
        index: usize,
        source: ConformationError,
    },
}

pub(super) fn candidates(conformation: &Conformation, index: usize) -> Vec<PullMove> {
    let len = conformation.len();
    let positions = conformation.positions();
    let Some(&current) = positions.get(index) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    for side in [PullSide::Preceding, PullSide::Following] {
        let Some(anchor) = side.anchor(index, len).map(|a| positions[a]) else {
            continue;
        };
        let pulled = side.pulled(index, len).map(|p| positions[p]);

        for target in lattice::diagonals(&current, conformation.dimension()) {
            if conformation.is_occupied(&target) || !lattice::is_adjacent(&target, &anchor) {
                continue;
            }
            // Fourth corner of the square spanned by anchor, current and target.
            let pivot = current + (target - anchor);
            let pivot_usable = match pulled {
                Some(neighbour) => neighbour == pivot || !conformation.is_occupied(&pivot),
                None => true,
            };
            if pivot_usable {
                moves.push(PullMove {
                    index,
                    target,
                    pivot,
                    side,
                });
            }
        }
    }
    moves
}

pub(super) fn apply(
    conformation: &Conformation,
    pull: &PullMove,
) -> Result<Conformation, PullMoveError> {
    let len = conformation.len();
    let index = pull.index;
    let not_applicable = |reason| PullMoveError::NotApplicable { index, reason };

    if index >= len {
        return Err(not_applicable("index out of range"));
    }
    if pull.side.anchor(index, len).is_none() {
        return Err(not_applicable("no anchor residue on this side"));
    }
    if conformation.is_occupied(&pull.target) {
        return Err(not_applicable("target is occupied"));
    }
    if !lattice::is_diagonal(&conformation.positions()[index], &pull.target) {
        return Err(not_applicable("target is not diagonal to the residue"));
    }

    let original = conformation.positions();
    let mut next = original.to_vec();
    next[index] = pull.target;

    match pull.side {
        PullSide::Preceding => {
            if index > 0 && !lattice::is_adjacent(&next[index - 1], &next[index]) {
                next[index - 1] = pull.pivot;
                let mut k = index - 1;
                while k > 0 && !lattice::is_adjacent(&next[k - 1], &next[k]) {
                    next[k - 1] = original[k + 1];
                    k -= 1;
                }
            }
        }
        PullSide::Following => {
            if index + 1 < len && !lattice::is_adjacent(&next[index + 1], &next[index]) {
                next[index + 1] = pull.pivot;
                let mut k = index + 1;
                while k + 1 < len && !lattice::is_adjacent(&next[k + 1], &next[k]) {
                    next[k + 1] = original[k - 1];
                    k += 1;
                }
            }
        }
    }

    Conformation::from_positions(
        conformation.sequence().clone(),
        conformation.dimension(),
        next,
    )
    .map(|moved| moved.normalized())
    .map_err(|source| PullMoveError::PropagationFailed { index, source })
}
