use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidueType {
    H, // Hydrophobic
    P, // Polar
    C, // Cysteine
}

impl ResidueType {
    pub const ALL: [ResidueType; 3] = [ResidueType::H, ResidueType::P, ResidueType::C];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' => Some(ResidueType::H),
            'P' => Some(ResidueType::P),
            'C' => Some(ResidueType::C),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            ResidueType::H => 'H',
            ResidueType::P => 'P',
            ResidueType::C => 'C',
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ResidueType::H => 0,
            ResidueType::P => 1,
            ResidueType::C => 2,
        }
    }
}

impl fmt::Display for ResidueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Sequence must contain at least 2 residues, got {len}")]
    TooShort { len: usize },
    #[error("Invalid residue '{residue}' at position {position}; expected one of H, P, C")]
    InvalidResidue { residue: char, position: usize },
}

/// A validated residue sequence of length two or more.
///
/// Cloning is O(1): every conformation built from the same sequence shares one
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    residues: Arc<[ResidueType]>,
}

impl Sequence {
    pub const MIN_LENGTH: usize = 2;

    pub fn new(residues: Vec<ResidueType>) -> Result<Self, SequenceError> {
        if residues.len() < Self::MIN_LENGTH {
            return Err(SequenceError::TooShort {
                len: residues.len(),
            });
        }
        Ok(Self {
            residues: residues.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[ResidueType] {
        &self.residues
    }

    pub fn iter(&self) -> impl Iterator<Item = ResidueType> + '_ {
        self.residues.iter().copied()
    }
}

impl Index<usize> for Sequence {
    type Output = ResidueType;

    fn index(&self, index: usize) -> &Self::Output {
        &self.residues[index]
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let residues = s
            .chars()
            .enumerate()
            .map(|(position, residue)| {
                ResidueType::from_char(residue)
                    .ok_or(SequenceError::InvalidResidue { residue, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(residues)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in self.iter() {
            write!(f, "{}", residue)?;
        }
        Ok(())
    }
}
