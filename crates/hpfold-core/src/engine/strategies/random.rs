use super::{SearchStrategy, retry_until_complete};
use crate::core::models::conformation::Conformation;
use crate::engine::config::ConstructionConfig;
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::moves::MoveSet;
use crate::engine::state::Solution;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

/// Uniformly random self-avoiding growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSearch {
    config: ConstructionConfig,
}

impl RandomSearch {
    pub fn new(config: ConstructionConfig) -> Self {
        Self { config }
    }

    /// One construction attempt; `Ok(None)` on a dead end.
    fn construct<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Option<Conformation>, EngineError> {
        let mut conformation = context.seed();
        while !conformation.is_complete() {
            let moves = match context.generate_moves(&conformation, self.config.prune_dead_ends) {
                MoveSet::Moves(moves) => moves,
                MoveSet::DeadEnd => return Ok(None),
            };
            match moves.choose(rng) {
                Some(&next) => conformation.append(next)?,
                None => return Ok(None),
            }
        }
        Ok(Some(conformation))
    }
}

impl SearchStrategy for RandomSearch {
    fn name(&self) -> &'static str {
        "random"
    }

    #[instrument(level = "debug", skip_all, name = "random_search")]
    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        let conformation = retry_until_complete(self.name(), self.config.max_attempts, |_| {
            self.construct(context, rng)
        })?;
        Ok(Solution::new(context.score(&conformation), conformation))
    }
}
