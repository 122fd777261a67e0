use super::{SearchStrategy, retry_until_complete};
use crate::core::models::conformation::Conformation;
use crate::core::models::lattice::Coordinate;
use crate::engine::config::{GreedyConfig, TieBreak};
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::moves::MoveSet;
use crate::engine::state::Solution;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{instrument, trace};

/// Places every residue at the legal position with the lowest resulting energy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySearch {
    config: GreedyConfig,
}

impl GreedySearch {
    pub fn new(config: GreedyConfig) -> Self {
        Self { config }
    }

    fn construct<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
        shuffle: bool,
    ) -> Result<Option<Conformation>, EngineError> {
        let prune = self.config.construction.prune_dead_ends;
        let mut conformation = context.seed();

        while !conformation.is_complete() {
            let mut moves = match context.generate_moves(&conformation, prune) {
                MoveSet::Moves(moves) => moves,
                MoveSet::DeadEnd => return Ok(None),
            };
            if shuffle {
                moves.shuffle(rng);
            }

            let mut best: Option<(Coordinate, i32)> = None;
            for candidate in moves {
                conformation.append(candidate)?;
                let score = context.score(&conformation);
                conformation.retract();

                let better = match best {
                    None => true,
                    Some((_, best_score)) => match self.config.tie_break {
                        TieBreak::First => score < best_score,
                        TieBreak::Last => score <= best_score,
                    },
                };
                if better {
                    best = Some((candidate, score));
                }
            }

            if let Some((chosen, score)) = best {
                trace!(residue = conformation.len(), score, "Greedy placement.");
                conformation.append(chosen)?;
            }
        }
        Ok(Some(conformation))
    }
}

impl SearchStrategy for GreedySearch {
    fn name(&self) -> &'static str {
        "greedy"
    }

    #[instrument(level = "debug", skip_all, name = "greedy_search")]
    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        // The first attempt follows the fixed move order; restarts shuffle it so a
        // deterministic dead end is not replayed.
        let conformation = retry_until_complete(
            self.name(),
            self.config.construction.max_attempts,
            |attempt| self.construct(context, rng, attempt > 1),
        )?;
        Ok(Solution::new(context.score(&conformation), conformation))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;
    use crate::core::models::lattice::Dimension;
    use crate::engine::config::ConstructionConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn greedy(tie_break: TieBreak) -> GreedySearch {
        GreedySearch::new(GreedyConfig {
            construction: ConstructionConfig::default(),
            tie_break,
        })
    }

    #[test]
    fn first_tie_break_keeps_earliest_move() {
        let seq = sequence("HHPH");
        let ctx = context(&seq, Dimension::Two);
        let mut rng = StdRng::seed_from_u64(0);
        let solution = greedy(TieBreak::First).search(&ctx, &mut rng).unwrap();
        // Every placement ties at zero, so the fold runs straight along +x.
        assert_eq!(
            solution.conformation.positions(),
            &[
                Coordinate::new(0, 0, 0),
                Coordinate::new(1, 0, 0),
                Coordinate::new(2, 0, 0),
                Coordinate::new(3, 0, 0)
            ]
        );
        assert_eq!(solution.energy, 0);
    }

    #[test]
    fn last_tie_break_bends_into_contact() {
        let seq = sequence("HHPH");
        let ctx = context(&seq, Dimension::Two);
        let mut rng = StdRng::seed_from_u64(0);
        let solution = greedy(TieBreak::Last).search(&ctx, &mut rng).unwrap();
        assert_eq!(
            solution.conformation.positions(),
            &[
                Coordinate::new(0, 0, 0),
                Coordinate::new(1, 0, 0),
                Coordinate::new(1, -1, 0),
                Coordinate::new(0, -1, 0)
            ]
        );
        assert_eq!(solution.energy, -1);
    }

    #[test]
    fn greedy_picks_the_contact_over_later_ties() {
        let seq = sequence("HPPHPPH");
        let ctx = context(&seq, Dimension::Two);
        let mut rng = StdRng::seed_from_u64(0);
        let solution = greedy(TieBreak::Last).search(&ctx, &mut rng).unwrap();
        // Residue 3 takes (0, -1) next to residue 0 even though (1, -2) comes later.
        assert_eq!(
            solution.conformation.positions(),
            &[
                Coordinate::new(0, 0, 0),
                Coordinate::new(1, 0, 0),
                Coordinate::new(1, -1, 0),
                Coordinate::new(0, -1, 0),
                Coordinate::new(0, -2, 0),
                Coordinate::new(0, -3, 0),
                Coordinate::new(0, -4, 0)
            ]
        );
        assert_eq!(solution.energy, -1);
        solution.conformation.validate().unwrap();
    }

    #[test]
    fn greedy_restarts_until_the_long_chain_completes() {
        let seq = sequence(FIFTY_MER);
        for dimension in [Dimension::Two, Dimension::Three] {
            let ctx = context(&seq, dimension);
            let mut rng = StdRng::seed_from_u64(5);
            let solution = greedy(TieBreak::First).search(&ctx, &mut rng).unwrap();
            assert!(solution.conformation.is_complete());
            assert_eq!(solution.energy, ctx.score(&solution.conformation));
        }
    }
}
