use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileStrategyConfig};
use super::models::AppConfig;
use crate::cli::{FoldArgs, StrategyKind};
use crate::error::{CliError, Result};
use hpfold::core::models::lattice::Dimension;
use hpfold::engine::config::{
    self as core_config, BeamConfig, ConstructionConfig, GreedyConfig, PullMoveConfig,
    StrategyConfig, TieBreak,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &FoldArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(config_path) => {
            let mut file_config = FileConfig::from_file(config_path)?;
            file_config.energy_table = file_config
                .energy_table
                .map(|table| relative_to(config_path, table));
            file_config
        }
        None => FileConfig::default(),
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let dimension = if args.three_d {
        Dimension::Three
    } else {
        match file_config.dimension.as_deref() {
            Some(value) => parse_value("dimension", value)?,
            None => defaults.dimension,
        }
    };
    let trials = args
        .trials
        .or(file_config.trials)
        .unwrap_or(defaults.trials);
    let seed = args.seed.or(file_config.seed);
    let contact_table = args
        .energy_table
        .clone()
        .or(file_config.energy_table.take());

    let strategy_file = file_config.strategy.take().unwrap_or_default();
    let strategy = merge_strategy(args, strategy_file, &defaults)?;
    debug!(strategy = strategy.name(), %dimension, trials, ?seed, "Merged fold configuration.");

    let core_config = core_config::FoldConfigBuilder::new()
        .dimension(dimension)
        .trials(trials)
        .seed(seed)
        .strategy(strategy)
        .contact_table(contact_table)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        output_path: args.output.clone(),
        core_config,
    })
}

fn merge_strategy(
    args: &FoldArgs,
    file_val: FileStrategyConfig,
    defaults: &DefaultsConfig,
) -> Result<StrategyConfig> {
    let kind = args.strategy.or(file_val.kind).unwrap_or(defaults.strategy);
    let construction = ConstructionConfig {
        max_attempts: args.max_attempts.or(file_val.max_attempts),
        prune_dead_ends: args.prune_dead_ends
            || file_val
                .prune_dead_ends
                .unwrap_or(defaults.prune_dead_ends),
    };
    let tie_break = match (args.tie_break, file_val.tie_break.as_deref()) {
        (Some(tie_break), _) => tie_break,
        (None, Some(value)) => parse_value("strategy.tie-break", value)?,
        (None, None) => defaults.tie_break,
    };

    let strategy = match kind {
        StrategyKind::Random => StrategyConfig::Random(construction),
        StrategyKind::Greedy => StrategyConfig::Greedy(GreedyConfig {
            construction,
            tie_break,
        }),
        StrategyKind::Beam => StrategyConfig::Beam(BeamConfig {
            width: args.width.or(file_val.width).unwrap_or(defaults.width),
            lookahead: args
                .lookahead
                .or(file_val.lookahead)
                .unwrap_or(defaults.lookahead),
            max_attempts: construction.max_attempts,
        }),
        StrategyKind::PullMove => StrategyConfig::PullMove(PullMoveConfig {
            patience: args
                .patience
                .or(file_val.patience)
                .unwrap_or(defaults.patience),
            start: construction,
        }),
    };
    Ok(strategy)
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

/// Paths in a config file are relative to the file itself.
fn relative_to(config_path: &Path, path: PathBuf) -> PathBuf {
    match config_path.parent() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "dimension" => {
                let _: Dimension = parse_value(key, value_str)?;
                config.dimension = Some(value_str.to_string());
            }
            "trials" => config.trials = Some(parse_value(key, value_str)?),
            "seed" => config.seed = Some(parse_value(key, value_str)?),
            "energy-table" => config.energy_table = Some(PathBuf::from(value_str)),
            "strategy.type" => {
                let kind = <StrategyKind as clap::ValueEnum>::from_str(value_str, false)
                    .map_err(|e| {
                        CliError::Config(format!("Invalid value for {}: {}", key, e))
                    })?;
                strategy(&mut config).kind = Some(kind);
            }
            "strategy.max-attempts" => {
                strategy(&mut config).max_attempts = Some(parse_value(key, value_str)?);
            }
            "strategy.prune-dead-ends" => {
                strategy(&mut config).prune_dead_ends = Some(parse_value(key, value_str)?);
            }
            "strategy.tie-break" => {
                let _: TieBreak = parse_value(key, value_str)?;
                strategy(&mut config).tie_break = Some(value_str.to_string());
            }
            "strategy.width" => strategy(&mut config).width = Some(parse_value(key, value_str)?),
            "strategy.lookahead" => {
                strategy(&mut config).lookahead = Some(parse_value(key, value_str)?);
            }
            "strategy.patience" => {
                strategy(&mut config).patience = Some(parse_value(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn strategy(config: &mut FileConfig) -> &mut FileStrategyConfig {
    config.strategy.get_or_insert_with(Default::default)
}
