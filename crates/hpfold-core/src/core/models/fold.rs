use super::lattice::Offset;
use std::fmt;
use thiserror::Error;

/// Direction of one chain step, encoded as `±1 = x`, `±2 = y`, `±3 = z`.
///
/// The last residue of a fold has no outgoing step and carries [`FoldCode::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldCode {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
    End,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid fold code {0}; expected one of -3, -2, -1, 0, 1, 2, 3")]
pub struct InvalidFoldCode(pub i8);

impl FoldCode {
    pub fn from_step(step: &Offset) -> Option<Self> {
        match (step.x, step.y, step.z) {
            (1, 0, 0) => Some(FoldCode::PosX),
            (-1, 0, 0) => Some(FoldCode::NegX),
            (0, 1, 0) => Some(FoldCode::PosY),
            (0, -1, 0) => Some(FoldCode::NegY),
            (0, 0, 1) => Some(FoldCode::PosZ),
            (0, 0, -1) => Some(FoldCode::NegZ),
            _ => None,
        }
    }

    pub fn step(self) -> Option<Offset> {
        match self {
            FoldCode::PosX => Some(Offset::new(1, 0, 0)),
            FoldCode::NegX => Some(Offset::new(-1, 0, 0)),
            FoldCode::PosY => Some(Offset::new(0, 1, 0)),
            FoldCode::NegY => Some(Offset::new(0, -1, 0)),
            FoldCode::PosZ => Some(Offset::new(0, 0, 1)),
            FoldCode::NegZ => Some(Offset::new(0, 0, -1)),
            FoldCode::End => None,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            FoldCode::PosX => 1,
            FoldCode::NegX => -1,
            FoldCode::PosY => 2,
            FoldCode::NegY => -2,
            FoldCode::PosZ => 3,
            FoldCode::NegZ => -3,
            FoldCode::End => 0,
        }
    }
}

impl TryFrom<i8> for FoldCode {
    type Error = InvalidFoldCode;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FoldCode::PosX),
            -1 => Ok(FoldCode::NegX),
            2 => Ok(FoldCode::PosY),
            -2 => Ok(FoldCode::NegY),
            3 => Ok(FoldCode::PosZ),
            -3 => Ok(FoldCode::NegZ),
            0 => Ok(FoldCode::End),
            other => Err(InvalidFoldCode(other)),
        }
    }
}

impl fmt::Display for FoldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}
