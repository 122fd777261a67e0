//! Search strategies.
//!
//! The three construction strategies grow a fold from the two-residue seed, asking the
//! [`SearchContext`] for moves at every step and restarting when they walk into a dead end.
//! [`PullMoveLocalSearch`] instead perturbs a complete fold until it stops improving.

mod beam;
mod greedy;
mod pull_move;
mod random;

pub use beam::BeamSearch;
pub use greedy::GreedySearch;
pub use pull_move::PullMoveLocalSearch;
pub use random::RandomSearch;

use super::config::{ConfigError, StrategyConfig};
use super::context::SearchContext;
use super::error::EngineError;
use super::state::Solution;
use crate::core::models::conformation::Conformation;
use rand::Rng;
use tracing::debug;

pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    /// Runs one independent search. All randomness is drawn from `rng`.
    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError>;
}

#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Random(RandomSearch),
    Greedy(GreedySearch),
    Beam(BeamSearch),
    PullMoveLocal(PullMoveLocalSearch),
}

impl TryFrom<&StrategyConfig> for Strategy {
    type Error = ConfigError;

    fn try_from(config: &StrategyConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(match *config {
            StrategyConfig::Random(c) => Strategy::Random(RandomSearch::new(c)),
            StrategyConfig::Greedy(c) => Strategy::Greedy(GreedySearch::new(c)),
            StrategyConfig::Beam(c) => Strategy::Beam(BeamSearch::new(c)?),
            StrategyConfig::PullMove(c) => Strategy::PullMoveLocal(PullMoveLocalSearch::new(c)),
        })
    }
}

impl SearchStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Random(s) => s.name(),
            Strategy::Greedy(s) => s.name(),
            Strategy::Beam(s) => s.name(),
            Strategy::PullMoveLocal(s) => s.name(),
        }
    }

    fn search<R: Rng + ?Sized>(
        &self,
        context: &SearchContext,
        rng: &mut R,
    ) -> Result<Solution, EngineError> {
        match self {
            Strategy::Random(s) => s.search(context, rng),
            Strategy::Greedy(s) => s.search(context, rng),
            Strategy::Beam(s) => s.search(context, rng),
            Strategy::PullMoveLocal(s) => s.search(context, rng),
        }
    }
}

/// Calls `attempt` with attempt numbers `1, 2, ...` until it returns a fold. `Ok(None)`
/// marks a dead end.
fn retry_until_complete<F>(
    strategy: &'static str,
    max_attempts: Option<usize>,
    mut attempt: F,
) -> Result<Conformation, EngineError>
where
    F: FnMut(usize) -> Result<Option<Conformation>, EngineError>,
{
    let mut number = 1;
    loop {
        if let Some(conformation) = attempt(number)? {
            if number > 1 {
                debug!(strategy, attempts = number, "Completed fold after restarts.");
            }
            return Ok(conformation);
        }
        if max_attempts.is_some_and(|max| number >= max) {
            return Err(EngineError::AttemptsExhausted { attempts: number });
        }
        debug!(strategy, attempt = number, "Dead end; restarting.");
        number += 1;
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::core::forcefield::scoring::EnergyScorer;
    use crate::core::models::lattice::Dimension;
    use crate::core::models::residue::Sequence;
    use crate::engine::context::SearchContext;

    pub const TWENTY_MER: &str = "HPHPPHHPHPPHPHHPPHPH";
    pub const FIFTY_MER: &str = "HCPHPCPHPCHCHPHPPPHPPPHPPPPHPCPHPPPHPHHHCCHCHCHCHH";

    pub static SCORER: EnergyScorer = EnergyScorer::DEFAULT;

    pub fn sequence(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    pub fn context(sequence: &Sequence, dimension: Dimension) -> SearchContext<'_> {
        SearchContext::new(sequence, dimension, &SCORER)
    }
}
