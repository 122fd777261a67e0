use crate::cli::StrategyKind;
use hpfold::core::models::lattice::Dimension;
use hpfold::engine::config::{BeamConfig, PullMoveConfig, TieBreak};

pub struct DefaultsConfig {
    pub dimension: Dimension,
    pub trials: usize,
    pub strategy: StrategyKind,
    pub prune_dead_ends: bool,
    pub tie_break: TieBreak,
    pub width: usize,
    pub lookahead: usize,
    pub patience: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let beam = BeamConfig::default();
        Self {
            dimension: Dimension::Two,
            trials: 1,
            strategy: StrategyKind::Random,
            prune_dead_ends: false,
            tie_break: TieBreak::First,
            width: beam.width,
            lookahead: beam.lookahead,
            patience: PullMoveConfig::default().patience,
        }
    }
}
