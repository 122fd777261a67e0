use nalgebra::{Matrix3, Point3, Vector3};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A point on the integer lattice. In 2D the `z` component is always zero.
pub type Coordinate = Point3<i32>;

/// A unit step or diagonal offset between two lattice points.
pub type Offset = Vector3<i32>;

const ORTHOGONAL_2D: [(i32, i32, i32); 4] = [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0)];
const ORTHOGONAL_3D: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

const DIAGONAL_2D: [(i32, i32, i32); 4] = [(1, 1, 0), (1, -1, 0), (-1, 1, 0), (-1, -1, 0)];
const DIAGONAL_3D: [(i32, i32, i32); 12] = [
    (1, 1, 0),
    (1, -1, 0),
    (-1, 1, 0),
    (-1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (-1, 0, 1),
    (-1, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

#[derive(Debug, Error)]
#[error("Invalid dimension '{0}'; expected '2d' or '3d'")]
pub struct ParseDimensionError(String);

impl Dimension {
    /// Orthogonal unit steps in the fixed enumeration order `+x, -x, +y, -y, +z, -z`.
    pub fn unit_steps(self) -> impl Iterator<Item = Offset> {
        let steps: &'static [(i32, i32, i32)] = match self {
            Dimension::Two => &ORTHOGONAL_2D,
            Dimension::Three => &ORTHOGONAL_3D,
        };
        steps.iter().map(|&(x, y, z)| Offset::new(x, y, z))
    }

    /// Offsets that change exactly two axes by one unit each.
    pub fn diagonal_steps(self) -> impl Iterator<Item = Offset> {
        let steps: &'static [(i32, i32, i32)] = match self {
            Dimension::Two => &DIAGONAL_2D,
            Dimension::Three => &DIAGONAL_3D,
        };
        steps.iter().map(|&(x, y, z)| Offset::new(x, y, z))
    }

    /// Whether `coordinate` lies in the lattice of this dimension.
    pub fn contains(self, coordinate: &Coordinate) -> bool {
        self == Dimension::Three || coordinate.z == 0
    }
}

impl FromStr for Dimension {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2d" | "2" => Ok(Dimension::Two),
            "3d" | "3" => Ok(Dimension::Three),
            _ => Err(ParseDimensionError(s.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Two => write!(f, "2D"),
            Dimension::Three => write!(f, "3D"),
        }
    }
}

pub fn origin() -> Coordinate {
    Coordinate::origin()
}

/// True iff `a` and `b` differ by exactly one along exactly one axis.
pub fn is_adjacent(a: &Coordinate, b: &Coordinate) -> bool {
    manhattan(a, b) == 1
}

/// True iff `a` and `b` differ by exactly one along exactly two axes.
pub fn is_diagonal(a: &Coordinate, b: &Coordinate) -> bool {
    let delta = b - a;
    delta.iter().all(|d| d.abs() <= 1) && manhattan(a, b) == 2
}

fn manhattan(a: &Coordinate, b: &Coordinate) -> i32 {
    (b - a).iter().map(|d| d.abs()).sum()
}

pub fn neighbors(
    coordinate: &Coordinate,
    dimension: Dimension,
) -> impl Iterator<Item = Coordinate> + use<> {
    let center = *coordinate;
    dimension.unit_steps().map(move |step| center + step)
}

pub fn diagonals(
    coordinate: &Coordinate,
    dimension: Dimension,
) -> impl Iterator<Item = Coordinate> + use<> {
    let center = *coordinate;
    dimension.diagonal_steps().map(move |step| center + step)
}

/// The proper lattice rotation that maps the unit step `direction` onto `+x`.
///
/// Rotations about `z` are used for in-plane directions so that 2D folds stay planar.
pub fn rotation_onto_x(direction: &Offset) -> Option<Matrix3<i32>> {
    let rotation = match (direction.x, direction.y, direction.z) {
        (1, 0, 0) => Matrix3::identity(),
        (-1, 0, 0) => Matrix3::new(-1, 0, 0, 0, -1, 0, 0, 0, 1),
        (0, 1, 0) => Matrix3::new(0, 1, 0, -1, 0, 0, 0, 0, 1),
        (0, -1, 0) => Matrix3::new(0, -1, 0, 1, 0, 0, 0, 0, 1),
        (0, 0, 1) => Matrix3::new(0, 0, 1, 0, 1, 0, -1, 0, 0),
        (0, 0, -1) => Matrix3::new(0, 0, -1, 0, 1, 0, 1, 0, 0),
        _ => return None,
    };
    Some(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn c(x: i32, y: i32, z: i32) -> Coordinate {
        Coordinate::new(x, y, z)
    }

    #[test]
    fn adjacency_requires_a_single_unit_step() {
        assert!(is_adjacent(&c(0, 0, 0), &c(1, 0, 0)));
        assert!(is_adjacent(&c(0, 0, 0), &c(0, -1, 0)));
        assert!(is_adjacent(&c(2, 3, 4), &c(2, 3, 5)));
        assert!(!is_adjacent(&c(0, 0, 0), &c(0, 0, 0)));
        assert!(!is_adjacent(&c(0, 0, 0), &c(1, 1, 0)));
        assert!(!is_adjacent(&c(0, 0, 0), &c(2, 0, 0)));
    }

    #[test]
    fn diagonal_requires_two_unit_axes() {
        assert!(is_diagonal(&c(0, 0, 0), &c(1, 1, 0)));
        assert!(is_diagonal(&c(0, 0, 0), &c(0, -1, 1)));
        assert!(!is_diagonal(&c(0, 0, 0), &c(2, 0, 0)));
        assert!(!is_diagonal(&c(0, 0, 0), &c(1, 1, 1)));
    }

    #[test]
    fn neighbors_follow_fixed_order_and_dimension() {
        let two_d: Vec<_> = neighbors(&c(0, 0, 0), Dimension::Two).collect();
        assert_eq!(
            two_d,
            vec![c(1, 0, 0), c(-1, 0, 0), c(0, 1, 0), c(0, -1, 0)]
        );
        let three_d: Vec<_> = neighbors(&c(0, 0, 0), Dimension::Three).collect();
        assert_eq!(three_d.len(), 6);
        assert_eq!(three_d[4], c(0, 0, 1));
        assert_eq!(three_d[5], c(0, 0, -1));
    }

    #[test]
    fn diagonals_are_distinct_and_truly_diagonal() {
        for dimension in [Dimension::Two, Dimension::Three] {
            let center = c(3, -2, 0);
            let all: HashSet<_> = diagonals(&center, dimension).collect();
            let expected = if dimension == Dimension::Two { 4 } else { 12 };
            assert_eq!(all.len(), expected);
            assert!(all.iter().all(|d| is_diagonal(&center, d)));
            assert!(all.iter().all(|d| dimension.contains(d)));
        }
    }

    #[test]
    fn rotation_onto_x_maps_every_unit_step_to_positive_x() {
        for step in Dimension::Three.unit_steps() {
            let rotation = rotation_onto_x(&step).unwrap();
            assert_eq!(rotation * step, Offset::new(1, 0, 0));
            assert_eq!(
                rotation.map(|v| v as f64).determinant().round() as i32,
                1,
                "rotation for {:?} must be proper",
                step
            );
        }
    }

    #[test]
    fn rotation_onto_x_keeps_planar_steps_planar() {
        for step in Dimension::Two.unit_steps() {
            let rotation = rotation_onto_x(&step).unwrap();
            let image = rotation * Offset::new(0, 1, 0);
            assert_eq!(image.z, 0);
        }
    }

    #[test]
    fn rotation_onto_x_rejects_non_unit_steps() {
        assert!(rotation_onto_x(&Offset::new(1, 1, 0)).is_none());
        assert!(rotation_onto_x(&Offset::new(0, 0, 0)).is_none());
    }

    #[test]
    fn dimension_parses_case_insensitively() {
        assert_eq!("2D".parse::<Dimension>().unwrap(), Dimension::Two);
        assert_eq!("3d".parse::<Dimension>().unwrap(), Dimension::Three);
        assert!("4d".parse::<Dimension>().is_err());
    }

    #[test]
    fn two_dimensional_lattice_excludes_nonzero_z() {
        assert!(Dimension::Two.contains(&c(5, 5, 0)));
        assert!(!Dimension::Two.contains(&c(0, 0, 1)));
        assert!(Dimension::Three.contains(&c(0, 0, 1)));
    }
}
