use super::params::ContactEnergyTable;
use crate::core::models::conformation::Conformation;
use crate::core::models::lattice;

/// A scoring contact between residues `i < j` that are lattice-adjacent but at least three
/// apart in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub i: usize,
    pub j: usize,
    pub energy: i32,
}

/// Minimum chain separation for two residues to form a contact.
pub const MIN_CONTACT_SEPARATION: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyScorer {
    table: ContactEnergyTable,
}

impl EnergyScorer {
    pub const DEFAULT: Self = Self {
        table: ContactEnergyTable::DEFAULT,
    };

    pub fn new(table: ContactEnergyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ContactEnergyTable {
        &self.table
    }

    /// Total contact energy of the placed residues. Works on partial conformations.
    pub fn score(&self, conformation: &Conformation) -> i32 {
        self.contact_iter(conformation).map(|c| c.energy).sum()
    }

    /// Every contact with a non-zero energy, ordered by `(i, j)`.
    pub fn contacts(&self, conformation: &Conformation) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self.contact_iter(conformation).collect();
        contacts.sort_unstable_by_key(|c| (c.i, c.j));
        contacts
    }

    fn contact_iter<'a>(
        &'a self,
        conformation: &'a Conformation,
    ) -> impl Iterator<Item = Contact> + 'a {
        let dimension = conformation.dimension();
        conformation
            .residues()
            .enumerate()
            .filter(move |(_, (_, residue))| !self.table.is_inert(*residue))
            .flat_map(move |(i, (coordinate, residue))| {
                lattice::neighbors(&coordinate, dimension).filter_map(move |neighbor| {
                    let j = conformation.occupant(&neighbor)?;
                    if j < i + MIN_CONTACT_SEPARATION {
                        return None;
                    }
                    let energy = self.table.energy(residue, conformation.residue_type(j));
                    (energy != 0).then_some(Contact { i, j, energy })
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::{Coordinate, Dimension};
    use crate::core::models::residue::{ResidueType, Sequence};
    use nalgebra::Matrix3;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn c(x: i32, y: i32, z: i32) -> Coordinate {
        Coordinate::new(x, y, z)
    }

    fn square(sequence: &str) -> Conformation {
        Conformation::from_positions(
            sequence.parse().unwrap(),
            Dimension::Two,
            vec![c(0, 0, 0), c(1, 0, 0), c(1, 1, 0), c(0, 1, 0)],
        )
        .unwrap()
    }

    #[test]
    fn hhph_square_has_one_contact() {
        let conf = square("HHPH");
        let scorer = EnergyScorer::default();
        assert_eq!(scorer.score(&conf), -1);
        assert_eq!(
            scorer.contacts(&conf),
            vec![Contact {
                i: 0,
                j: 3,
                energy: -1
            }]
        );
    }

    #[test]
    fn cysteine_pair_scores_minus_five() {
        assert_eq!(EnergyScorer::default().score(&square("CPPC")), -5);
        assert_eq!(EnergyScorer::default().score(&square("CPPH")), -1);
    }

    #[test]
    fn polar_residues_never_contribute() {
        assert_eq!(EnergyScorer::default().score(&square("PHHP")), 0);
        assert!(EnergyScorer::default().contacts(&square("HPPP")).is_empty());
    }

    #[test]
    fn chain_neighbours_are_not_contacts() {
        let conf = Conformation::new("HHHH".parse().unwrap(), Dimension::Two);
        assert_eq!(EnergyScorer::default().score(&conf), 0);
    }

    #[test]
    fn custom_table_changes_score() {
        let mut table = ContactEnergyTable::zeroed();
        table.set(ResidueType::H, ResidueType::H, -3);
        assert_eq!(EnergyScorer::new(table).score(&square("HHPH")), -3);
    }

    #[test]
    fn polar_contacts_count_when_the_table_says_so() {
        let mut table = ContactEnergyTable::zeroed();
        table.set(ResidueType::P, ResidueType::P, -2);
        let scorer = EnergyScorer::new(table);
        assert_eq!(scorer.score(&square("PHHP")), -2);
        assert_eq!(scorer.score(&square("HHHH")), 0);
    }

    #[test]
    fn score_tracks_appends_and_retracts() {
        let mut conf = Conformation::new("HPPH".parse().unwrap(), Dimension::Two);
        conf.append(c(1, 1, 0)).unwrap();
        assert_eq!(conf.energy(), 0);
        conf.append(c(0, 1, 0)).unwrap();
        assert_eq!(conf.energy(), -1);
        conf.retract();
        conf.append(c(2, 1, 0)).unwrap();
        assert_eq!(conf.energy(), 0);
    }

    fn random_walk(sequence: &Sequence, dimension: Dimension, seed: u64) -> Conformation {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            let mut conf = Conformation::new(sequence.clone(), dimension);
            while !conf.is_complete() {
                let free: Vec<_> = lattice::neighbors(&conf.last_position(), dimension)
                    .filter(|n| !conf.is_occupied(n))
                    .collect();
                match free.choose(&mut rng) {
                    Some(&next) => conf.append(next).unwrap(),
                    None => break,
                }
            }
            if conf.is_complete() {
                return conf;
            }
        }
    }

    /// The 48 signed permutation matrices: every rotation and reflection of the cubic lattice.
    fn symmetries() -> Vec<Matrix3<i32>> {
        let permutations = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut out = Vec::with_capacity(48);
        for perm in permutations {
            for signs in 0..8 {
                let mut m = Matrix3::zeros();
                for (row, &col) in perm.iter().enumerate() {
                    m[(row, col)] = if signs & (1 << row) == 0 { 1 } else { -1 };
                }
                out.push(m);
            }
        }
        out
    }

    fn residue_strategy() -> impl Strategy<Value = ResidueType> {
        prop_oneof![
            Just(ResidueType::H),
            Just(ResidueType::P),
            Just(ResidueType::C)
        ]
    }

    proptest! {
        #[test]
        fn energy_is_invariant_under_lattice_symmetries(
            residues in prop::collection::vec(residue_strategy(), 2..16),
            seed in any::<u64>(),
            symmetry in 0usize..48,
        ) {
            let sequence = Sequence::new(residues).unwrap();
            let conf = random_walk(&sequence, Dimension::Three, seed);
            let m = symmetries()[symmetry];
            let moved: Vec<Coordinate> = conf
                .positions()
                .iter()
                .map(|p| Coordinate::from(m * p.coords))
                .collect();
            let image = Conformation::from_positions(sequence, Dimension::Three, moved).unwrap();
            let scorer = EnergyScorer::default();
            prop_assert_eq!(scorer.score(&image), scorer.score(&conf));
            prop_assert_eq!(image.normalized().energy(), conf.energy());
        }

        #[test]
        fn score_equals_sum_over_contacts(
            residues in prop::collection::vec(residue_strategy(), 2..20),
            seed in any::<u64>(),
        ) {
            let sequence = Sequence::new(residues).unwrap();
            let conf = random_walk(&sequence, Dimension::Two, seed);
            let scorer = EnergyScorer::default();
            let contacts = scorer.contacts(&conf);
            prop_assert_eq!(scorer.score(&conf), contacts.iter().map(|c| c.energy).sum::<i32>());
            for contact in contacts {
                prop_assert!(contact.j >= contact.i + MIN_CONTACT_SEPARATION);
                prop_assert!(lattice::is_adjacent(
                    &conf.positions()[contact.i],
                    &conf.positions()[contact.j]
                ));
            }
        }
    }
}
