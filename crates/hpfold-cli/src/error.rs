use hpfold::core::forcefield::params::TableLoadError;
use hpfold::core::io::fold_csv::FoldCsvError;
use hpfold::core::models::residue::SequenceError;
use hpfold::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid sequence: {0}")]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    TableLoad(#[from] TableLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to process fold file '{path}': {source}", path = path.display())]
    FoldFile {
        path: PathBuf,
        #[source]
        source: FoldCsvError,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
