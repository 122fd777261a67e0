use super::{RandomSearch, SearchStrategy};
use crate::core::models::conformation::Conformation;
use crate::engine::config::PullMoveConfig;
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::state::Solution;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, trace};

/// Hill climbing over pull moves, started from a random fold.
#[derive(Debug, Clone, Copy, Default)]
pub struct PullMoveLocalSearch {
    config: PullMoveConfig,
}

impl PullMoveLocalSearch {
    pub fn new(config: PullMoveConfig) -> Self {
        Self { config }
    }

    /// Improves a complete fold until `patience` consecutive sweeps find nothing better.
    ///
    /// Each sweep visits every residue once in random order and accepts the first pull move
    /// of that residue that strictly lowers the energy.
    pub fn climb<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        start: Conformation,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        if !start.is_complete() {
            return Err(EngineError::IncompleteStart {
                placed: start.len(),
                expected: start.sequence().len(),
            });
        }

        let mut current = start;
        let mut energy = context.score(&current);
        let mut order: Vec<usize> = (0..current.len()).collect();
        let mut stale = 0;
        let mut sweeps = 0;

        while stale < self.config.patience {
            sweeps += 1;
            order.shuffle(rng);
            let mut improved = false;

            for &index in &order {
                for pull in context.moves.pull_moves(&current, index) {
                    let candidate = match context.moves.apply_pull(&current, &pull) {
                        Ok(candidate) => candidate,
                        Err(e) => {
                            trace!(error = %e, "Discarded pull move.");
                            continue;
                        }
                    };
                    let candidate_energy = context.score(&candidate);
                    if candidate_energy < energy {
                        trace!(index, from = energy, to = candidate_energy, "Accepted pull move.");
                        current = candidate;
                        energy = candidate_energy;
                        improved = true;
                        break;
                    }
                }
            }

            if improved {
                stale = 0;
            } else {
                stale += 1;
            }
        }

        debug!(sweeps, energy, "Pull-move climb finished.");
        Ok(Solution::new(energy, current))
    }
}

impl SearchStrategy for PullMoveLocalSearch {
    fn name(&self) -> &'static str {
        "pull-move"
    }

    #[instrument(level = "debug", skip_all, name = "pull_move_search", fields(patience = self.config.patience))]
    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        let start = RandomSearch::new(self.config.start).search(context, rng)?;
        debug!(energy = start.energy, "Built random starting fold.");
        self.climb(context, start.conformation, rng)
    }
}
