use crate::cli::StrategyKind;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileStrategyConfig {
    #[serde(rename = "type")]
    pub kind: Option<StrategyKind>,
    pub max_attempts: Option<usize>,
    pub prune_dead_ends: Option<bool>,
    pub tie_break: Option<String>,
    pub width: Option<usize>,
    pub lookahead: Option<usize>,
    pub patience: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub dimension: Option<String>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub energy_table: Option<PathBuf>,
    pub strategy: Option<FileStrategyConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_full_kebab_case_file() {
        let config: FileConfig = toml::from_str(
            r#"
            dimension = "3d"
            trials = 100
            seed = 7
            energy-table = "table.toml"

            [strategy]
            type = "pull-move"
            max-attempts = 20
            prune-dead-ends = true
            patience = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.dimension.as_deref(), Some("3d"));
        assert_eq!(config.trials, Some(100));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.energy_table, Some(PathBuf::from("table.toml")));
        let strategy = config.strategy.unwrap();
        assert_eq!(strategy.kind, Some(StrategyKind::PullMove));
        assert_eq!(strategy.max_attempts, Some(20));
        assert_eq!(strategy.prune_dead_ends, Some(true));
        assert_eq!(strategy.patience, Some(4));
        assert_eq!(strategy.width, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trials = 3\nbeam-width = 4\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
