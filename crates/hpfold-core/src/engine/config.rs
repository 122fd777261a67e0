use crate::core::models::lattice::Dimension;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Options shared by strategies that build a fold residue by residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstructionConfig {
    /// `None` retries until a complete fold is found.
    pub max_attempts: Option<usize>,
    pub prune_dead_ends: bool,
}

/// Which of several equally scored candidates greedy construction keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    First,
    Last,
}

#[derive(Debug, Error)]
#[error("Invalid tie-break '{0}'; expected 'first' or 'last'")]
pub struct ParseTieBreakError(String);

impl FromStr for TieBreak {
    type Err = ParseTieBreakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(TieBreak::First),
            "last" => Ok(TieBreak::Last),
            _ => Err(ParseTieBreakError(s.to_string())),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::First => write!(f, "first"),
            TieBreak::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GreedyConfig {
    pub construction: ConstructionConfig,
    pub tie_break: TieBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamConfig {
    pub width: usize,
    pub lookahead: usize,
    pub max_attempts: Option<usize>,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            width: 50,
            lookahead: 3,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullMoveConfig {
    /// Consecutive sweeps without improvement before the climb stops.
    pub patience: usize,
    /// How the random starting fold is built.
    pub start: ConstructionConfig,
}

impl Default for PullMoveConfig {
    fn default() -> Self {
        Self {
            patience: 10,
            start: ConstructionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyConfig {
    Random(ConstructionConfig),
    Greedy(GreedyConfig),
    Beam(BeamConfig),
    PullMove(PullMoveConfig),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Random(ConstructionConfig::default())
    }
}

impl StrategyConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Random(_) => "random",
            StrategyConfig::Greedy(_) => "greedy",
            StrategyConfig::Beam(_) => "beam",
            StrategyConfig::PullMove(_) => "pull-move",
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StrategyConfig::Random(construction)
            | StrategyConfig::Greedy(GreedyConfig { construction, .. })
            | StrategyConfig::PullMove(PullMoveConfig {
                start: construction,
                ..
            }) => check_attempts(construction.max_attempts),
            StrategyConfig::Beam(beam) => {
                if beam.width == 0 {
                    return Err(ConfigError::InvalidParameter {
                        name: "width",
                        reason: "beam width must be at least 1".to_string(),
                    });
                }
                check_attempts(beam.max_attempts)
            }
        }
    }
}

fn check_attempts(max_attempts: Option<usize>) -> Result<(), ConfigError> {
    if max_attempts == Some(0) {
        return Err(ConfigError::InvalidParameter {
            name: "max_attempts",
            reason: "attempt cap must be at least 1 (omit it for no cap)".to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoldConfig {
    pub dimension: Dimension,
    pub trials: usize,
    /// Base seed; trial `i` uses `seed + i`. `None` seeds every trial from entropy.
    pub seed: Option<u64>,
    pub strategy: StrategyConfig,
    /// TOML contact table; `None` uses the built-in HP/C energies.
    pub contact_table: Option<PathBuf>,
}

#[derive(Default)]
pub struct FoldConfigBuilder {
    dimension: Option<Dimension>,
    trials: Option<usize>,
    seed: Option<u64>,
    strategy: Option<StrategyConfig>,
    contact_table: Option<PathBuf>,
}

impl FoldConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn contact_table(mut self, path: Option<PathBuf>) -> Self {
        self.contact_table = path;
        self
    }

    pub fn build(self) -> Result<FoldConfig, ConfigError> {
        let trials = self
            .trials
            .ok_or(ConfigError::MissingParameter("trials"))?;
        if trials == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "trials",
                reason: "at least one trial is required".to_string(),
            });
        }
        let strategy = self
            .strategy
            .ok_or(ConfigError::MissingParameter("strategy"))?;
        strategy.validate()?;

        Ok(FoldConfig {
            dimension: self
                .dimension
                .ok_or(ConfigError::MissingParameter("dimension"))?,
            trials,
            seed: self.seed,
            strategy,
            contact_table: self.contact_table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> FoldConfigBuilder {
        FoldConfigBuilder::new()
            .dimension(Dimension::Three)
            .trials(5)
            .seed(Some(42))
            .strategy(StrategyConfig::Beam(BeamConfig::default()))
    }

    #[test]
    fn build_succeeds_with_all_required_parameters() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.dimension, Dimension::Three);
        assert_eq!(config.trials, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.contact_table, None);
        assert_eq!(config.strategy.name(), "beam");
    }

    #[test]
    fn build_reports_missing_parameters() {
        assert_eq!(
            FoldConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("trials")
        );
        assert_eq!(
            FoldConfigBuilder::new().trials(1).build().unwrap_err(),
            ConfigError::MissingParameter("strategy")
        );
        assert_eq!(
            FoldConfigBuilder::new()
                .trials(1)
                .strategy(StrategyConfig::default())
                .build()
                .unwrap_err(),
            ConfigError::MissingParameter("dimension")
        );
    }

    #[test]
    fn build_rejects_zero_trials() {
        let err = complete_builder().trials(0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "trials", .. }
        ));
    }

    #[test]
    fn build_rejects_zero_beam_width() {
        let err = complete_builder()
            .strategy(StrategyConfig::Beam(BeamConfig {
                width: 0,
                ..BeamConfig::default()
            }))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "width", .. }
        ));
    }

    #[test]
    fn build_rejects_zero_attempt_cap_for_every_construction_strategy() {
        let capped = ConstructionConfig {
            max_attempts: Some(0),
            prune_dead_ends: false,
        };
        for strategy in [
            StrategyConfig::Random(capped),
            StrategyConfig::Greedy(GreedyConfig {
                construction: capped,
                tie_break: TieBreak::First,
            }),
            StrategyConfig::PullMove(PullMoveConfig {
                patience: 3,
                start: capped,
            }),
            StrategyConfig::Beam(BeamConfig {
                max_attempts: Some(0),
                ..BeamConfig::default()
            }),
        ] {
            let err = complete_builder().strategy(strategy).build().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidParameter {
                    name: "max_attempts",
                    ..
                }
            ));
        }
    }

    #[test]
    fn tie_break_parses_and_displays() {
        assert_eq!("LAST".parse::<TieBreak>().unwrap(), TieBreak::Last);
        assert_eq!(TieBreak::First.to_string(), "first");
        assert!("middle".parse::<TieBreak>().is_err());
    }
}
