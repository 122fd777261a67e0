use super::{SearchStrategy, retry_until_complete};
use crate::core::models::conformation::Conformation;
use crate::engine::config::{BeamConfig, ConfigError, StrategyConfig};
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::moves::MoveSet;
use crate::engine::state::Solution;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Breadth-limited construction that keeps the `width` most promising partial folds, ranked
/// by a bounded lookahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeamSearch {
    config: BeamConfig,
}

impl BeamSearch {
    /// Fails with `ConfigError::InvalidParameter` when the width is zero.
    pub fn new(config: BeamConfig) -> Result<Self, ConfigError> {
        StrategyConfig::Beam(config).validate()?;
        Ok(Self { config })
    }

    /// Best energy reachable from `conformation` within `depth` more placements.
    ///
    /// Returns the exact score once the depth is spent, the fold is complete, or only
    /// residues that cannot form contacts remain. A dead end counts as a neutral `0`.
    /// The conformation is restored before returning.
    fn simulate(
        context: &SearchContext,
        conformation: &mut Conformation,
        depth: usize,
    ) -> Result<i32, EngineError> {
        if depth == 0
            || conformation.is_complete()
            || conformation
                .remaining_types()
                .iter()
                .all(|&r| context.scorer.table().is_inert(r))
        {
            return Ok(context.score(conformation));
        }

        let moves = match context.generate_moves(conformation, false) {
            MoveSet::Moves(moves) => moves,
            MoveSet::DeadEnd => return Ok(0),
        };
        let mut best = i32::MAX;
        for next in moves {
            conformation.append(next)?;
            let predicted = Self::simulate(context, conformation, depth - 1);
            conformation.retract();
            best = best.min(predicted?);
        }
        Ok(best)
    }

    /// Scores every successor of every beam state. Order is preserved so that ties are
    /// resolved by state order, then move order.
    fn expand<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        states: &[Conformation],
        rng: &mut R,
        shuffle: bool,
    ) -> Result<Vec<(i32, Conformation)>, EngineError> {
        let mut successors = Vec::new();
        for state in states {
            let mut moves = match context.generate_moves(state, false) {
                MoveSet::Moves(moves) => moves,
                MoveSet::DeadEnd => continue,
            };
            if shuffle {
                moves.shuffle(rng);
            }
            for next in moves {
                let mut successor = state.clone();
                successor.append(next)?;
                successors.push(successor);
            }
        }

        let lookahead = self.config.lookahead;

        #[cfg(not(feature = "parallel"))]
        let iterator = successors.into_iter();

        #[cfg(feature = "parallel")]
        let iterator = successors.into_par_iter();

        iterator
            .map(|mut successor| {
                let predicted = Self::simulate(context, &mut successor, lookahead)?;
                Ok((predicted, successor))
            })
            .collect()
    }

    fn construct<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
        shuffle: bool,
    ) -> Result<Option<Conformation>, EngineError> {
        self.grow(context, vec![context.seed()], rng, shuffle)
    }

    /// Advances `states` one residue at a time until they are complete. `Ok(None)` means
    /// every state ran into a dead end.
    fn grow<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        mut states: Vec<Conformation>,
        rng: &mut R,
        shuffle: bool,
    ) -> Result<Option<Conformation>, EngineError> {
        while states.iter().any(|s| !s.is_complete()) {
            let mut successors = self.expand(context, &states, rng, shuffle)?;
            if successors.is_empty() {
                debug!(placed = states[0].len(), "Beam exhausted; every state is a dead end.");
                return Ok(None);
            }
            successors.sort_by_key(|(predicted, _)| *predicted);
            successors.truncate(self.config.width);
            states = successors.into_iter().map(|(_, state)| state).collect();
        }

        Ok(states.into_iter().min_by_key(|state| context.score(state)))
    }
}

impl SearchStrategy for BeamSearch {
    fn name(&self) -> &'static str {
        "beam"
    }

    #[instrument(level = "debug", skip_all, name = "beam_search", fields(width = self.config.width, lookahead = self.config.lookahead))]
    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        let conformation = retry_until_complete(self.name(), self.config.max_attempts, |attempt| {
            self.construct(context, rng, attempt > 1)
        })?;
        Ok(Solution::new(context.score(&conformation), conformation))
    }
}
