use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::TableLoadError;
use crate::core::models::conformation::ConformationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load contact energy table: {0}")]
    TableLoad(#[from] TableLoadError),

    #[error("Rejected placement: {0}")]
    ContractViolation(#[from] ConformationError),

    #[error("No complete fold found after {attempts} attempt(s)")]
    AttemptsExhausted { attempts: usize },

    #[error("Local search needs a complete fold, got {placed} of {expected} residues")]
    IncompleteStart { placed: usize, expected: usize },

    #[error("All {trials} trial(s) failed to produce a fold")]
    NoSolution { trials: usize },
}
