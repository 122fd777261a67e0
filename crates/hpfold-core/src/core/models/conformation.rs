use super::fold::FoldCode;
use super::lattice::{self, Coordinate, Dimension};
use super::residue::{ResidueType, Sequence};
use crate::core::forcefield::scoring::EnergyScorer;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConformationError {
    #[error("Conformation is already complete ({len} residues placed)")]
    Complete { len: usize },

    #[error("Residue {index} at {coordinate} is not adjacent to residue {} at {previous}", .index - 1)]
    NotAdjacent {
        index: usize,
        coordinate: Coordinate,
        previous: Coordinate,
    },

    #[error("Residue {index} cannot be placed at {coordinate}: occupied by residue {occupant}")]
    Occupied {
        index: usize,
        coordinate: Coordinate,
        occupant: usize,
    },

    #[error("Residue {index} at {coordinate} leaves the plane of a 2D lattice")]
    OutOfPlane { index: usize, coordinate: Coordinate },

    #[error("Expected between 2 and {max} placed residues, got {actual}")]
    Length { max: usize, actual: usize },

    #[error("Invalid fold code at residue {index}: {code}")]
    FoldCode { index: usize, code: FoldCode },
}

/// A placement of the first `len()` residues of a sequence on the lattice.
///
/// Invariants, checked on every mutation:
/// - consecutive residues are lattice-adjacent;
/// - no two residues share a coordinate;
/// - the chain lies in the `z = 0` plane for [`Dimension::Two`].
///
/// Conformations grown with [`Conformation::new`] and [`Conformation::append`], and those
/// returned by [`Conformation::normalized`], additionally keep residue 0 at the origin and
/// residue 1 at `(1, 0, 0)`.
#[derive(Debug, Clone)]
pub struct Conformation {
    sequence: Sequence,
    dimension: Dimension,
    positions: Vec<Coordinate>,
    occupancy: HashMap<Coordinate, usize>,
}

impl PartialEq for Conformation {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.sequence == other.sequence
            && self.positions == other.positions
    }
}

impl Eq for Conformation {}

impl Conformation {
    /// Creates the two-residue seed shared by every construction strategy.
    pub fn new(sequence: Sequence, dimension: Dimension) -> Self {
        let seed = [lattice::origin(), Coordinate::new(1, 0, 0)];
        let mut positions = Vec::with_capacity(sequence.len());
        let mut occupancy = HashMap::with_capacity(sequence.len());
        for (index, coordinate) in seed.into_iter().enumerate() {
            positions.push(coordinate);
            occupancy.insert(coordinate, index);
        }
        Self {
            sequence,
            dimension,
            positions,
            occupancy,
        }
    }

    /// Builds a conformation from explicit positions, validating every invariant except the
    /// seed orientation.
    pub fn from_positions(
        sequence: Sequence,
        dimension: Dimension,
        positions: Vec<Coordinate>,
    ) -> Result<Self, ConformationError> {
        if positions.len() < Sequence::MIN_LENGTH || positions.len() > sequence.len() {
            return Err(ConformationError::Length {
                max: sequence.len(),
                actual: positions.len(),
            });
        }

        let mut occupancy = HashMap::with_capacity(sequence.len());
        for (index, coordinate) in positions.iter().enumerate() {
            Self::check_placement(dimension, &occupancy, &positions, index, coordinate)?;
            occupancy.insert(*coordinate, index);
        }

        Ok(Self {
            sequence,
            dimension,
            positions,
            occupancy,
        })
    }

    /// Rebuilds a fold from its direction codes. A trailing [`FoldCode::End`] is accepted and
    /// ignored; the result is [`normalized`](Self::normalized).
    pub fn from_fold_codes(
        sequence: Sequence,
        dimension: Dimension,
        codes: &[FoldCode],
    ) -> Result<Self, ConformationError> {
        let mut positions = Vec::with_capacity(sequence.len());
        let mut current = lattice::origin();
        positions.push(current);

        for (index, code) in codes.iter().enumerate() {
            match code.step() {
                Some(step) => {
                    current += step;
                    positions.push(current);
                }
                None if index == codes.len() - 1 => {}
                None => return Err(ConformationError::FoldCode { index, code: *code }),
            }
        }

        Ok(Self::from_positions(sequence, dimension, positions)?.normalized())
    }

    /// Places the next residue at `coordinate`.
    ///
    /// The caller must only offer coordinates that are free and adjacent to the last
    /// residue; anything else is rejected without modifying the conformation.
    pub fn append(&mut self, coordinate: Coordinate) -> Result<(), ConformationError> {
        let index = self.positions.len();
        if self.is_complete() {
            return Err(ConformationError::Complete { len: index });
        }
        Self::check_placement(
            self.dimension,
            &self.occupancy,
            &self.positions,
            index,
            &coordinate,
        )?;
        self.positions.push(coordinate);
        self.occupancy.insert(coordinate, index);
        Ok(())
    }

    /// Removes the most recently placed residue. The two-residue seed is never removed.
    pub fn retract(&mut self) -> Option<Coordinate> {
        if self.positions.len() <= Sequence::MIN_LENGTH {
            return None;
        }
        let coordinate = self.positions.pop()?;
        self.occupancy.remove(&coordinate);
        Some(coordinate)
    }

    fn check_placement(
        dimension: Dimension,
        occupancy: &HashMap<Coordinate, usize>,
        positions: &[Coordinate],
        index: usize,
        coordinate: &Coordinate,
    ) -> Result<(), ConformationError> {
        if !dimension.contains(coordinate) {
            return Err(ConformationError::OutOfPlane {
                index,
                coordinate: *coordinate,
            });
        }
        if let Some(&occupant) = occupancy.get(coordinate) {
            return Err(ConformationError::Occupied {
                index,
                coordinate: *coordinate,
                occupant,
            });
        }
        if index > 0 {
            let previous = positions[index - 1];
            if !lattice::is_adjacent(&previous, coordinate) {
                return Err(ConformationError::NotAdjacent {
                    index,
                    coordinate: *coordinate,
                    previous,
                });
            }
        }
        Ok(())
    }

    /// Re-checks chain adjacency and self-avoidance over the whole chain.
    pub fn validate(&self) -> Result<(), ConformationError> {
        let mut seen = HashMap::with_capacity(self.positions.len());
        for (index, coordinate) in self.positions.iter().enumerate() {
            Self::check_placement(self.dimension, &seen, &self.positions, index, coordinate)?;
            seen.insert(*coordinate, index);
        }
        Ok(())
    }

    /// Whether residue 0 sits at the origin and residue 1 at `(1, 0, 0)`.
    pub fn is_canonical(&self) -> bool {
        self.positions[0] == lattice::origin() && self.positions[1] == Coordinate::new(1, 0, 0)
    }

    /// Returns the rigidly moved copy of this fold that satisfies the seed orientation.
    pub fn normalized(&self) -> Self {
        if self.is_canonical() {
            return self.clone();
        }
        let anchor = self.positions[0];
        let first_step = self.positions[1] - anchor;
        // Adjacency of residues 0 and 1 guarantees a unit step.
        let rotation =
            lattice::rotation_onto_x(&first_step).unwrap_or_else(nalgebra::Matrix3::identity);

        let positions: Vec<Coordinate> = self
            .positions
            .iter()
            .map(|p| Coordinate::from(rotation * (*p - anchor)))
            .collect();
        let occupancy = positions
            .iter()
            .enumerate()
            .map(|(index, coordinate)| (*coordinate, index))
            .collect();

        Self {
            sequence: self.sequence.clone(),
            dimension: self.dimension,
            positions,
            occupancy,
        }
    }

    pub fn is_adjacent(a: &Coordinate, b: &Coordinate) -> bool {
        lattice::is_adjacent(a, b)
    }

    pub fn is_complete(&self) -> bool {
        self.positions.len() == self.sequence.len()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> Option<Coordinate> {
        self.positions.get(index).copied()
    }

    pub fn residue_type(&self, index: usize) -> ResidueType {
        self.sequence[index]
    }

    pub fn last_position(&self) -> Coordinate {
        // The seed guarantees at least two placed residues.
        self.positions[self.positions.len() - 1]
    }

    pub fn occupant(&self, coordinate: &Coordinate) -> Option<usize> {
        self.occupancy.get(coordinate).copied()
    }

    pub fn is_occupied(&self, coordinate: &Coordinate) -> bool {
        self.occupancy.contains_key(coordinate)
    }

    /// Residue types that still have to be placed.
    pub fn remaining_types(&self) -> &[ResidueType] {
        &self.sequence.residues()[self.positions.len()..]
    }

    /// Placed residues in chain order.
    pub fn residues(&self) -> impl Iterator<Item = (Coordinate, ResidueType)> + '_ {
        self.positions.iter().copied().zip(self.sequence.iter())
    }

    /// Contact energy under the default HP/C table.
    pub fn energy(&self) -> i32 {
        EnergyScorer::default().score(self)
    }

    /// Direction codes of every placed residue, terminated by [`FoldCode::End`].
    pub fn fold_codes(&self) -> Vec<FoldCode> {
        self.positions
            .windows(2)
            .filter_map(|pair| FoldCode::from_step(&(pair[1] - pair[0])))
            .chain(std::iter::once(FoldCode::End))
            .collect()
    }
}
