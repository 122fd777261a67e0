use crate::core::models::conformation::Conformation;
use crate::core::models::fold::FoldCode;
use std::cmp::Ordering;

/// A complete fold and its energy. Ordered so that lower energy compares greater, which
/// makes the best solution the maximum of a `BinaryHeap` or an iterator.
#[derive(Debug, Clone)]
pub struct Solution {
    pub energy: i32,
    pub conformation: Conformation,
}

impl Solution {
    pub fn new(energy: i32, conformation: Conformation) -> Self {
        Self {
            energy,
            conformation,
        }
    }

    pub fn fold_codes(&self) -> Vec<FoldCode> {
        self.conformation.fold_codes()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.energy == other.energy
    }
}
impl Eq for Solution {}

impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Solution {
    fn cmp(&self, other: &Self) -> Ordering {
        other.energy.cmp(&self.energy)
    }
}
