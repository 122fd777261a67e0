use crate::cli::FoldArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hpfold::core::io::fold_csv::write_fold;
use hpfold::core::models::residue::Sequence;
use hpfold::engine::progress::ProgressReporter;
use hpfold::workflows::{self, fold::FoldResult};
use tracing::{info, warn};

pub fn run(args: FoldArgs) -> Result<()> {
    run_with_progress(args, CliProgressHandler::new())
}

fn run_with_progress(args: FoldArgs, progress_handler: CliProgressHandler) -> Result<()> {
    let sequence: Sequence = args.sequence.parse()?;
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Folding {} residues on the {} lattice with the {} strategy ({} trial(s))...",
        sequence.len(),
        config.dimension,
        config.strategy.name(),
        config.trials
    );
    info!("Invoking the core fold workflow...");
    let result = workflows::fold::run(&sequence, config, &reporter)?;

    if result.failed_trials > 0 {
        warn!(
            "{} of {} trial(s) ran out of construction attempts.",
            result.failed_trials, config.trials
        );
    }

    let output_path = &app_config.output_path;
    info!(
        "Writing best fold (Energy: {}) to {:?}",
        result.best.energy, output_path
    );
    write_fold(output_path, &result.best.conformation, result.best.energy).map_err(|e| {
        CliError::FoldFile {
            path: output_path.clone(),
            source: e,
        }
    })?;

    print_summary(&result);
    println!("✓ Best fold written to: {}", output_path.display());
    Ok(())
}

fn print_summary(result: &FoldResult) {
    let codes: Vec<String> = result
        .best
        .fold_codes()
        .iter()
        .map(|code| code.to_string())
        .collect();
    println!("Best energy: {}", result.best.energy);
    println!("Fold codes:  {}", codes.join(" "));
    if result.energies.len() > 1 {
        let mean = result.energies.iter().map(|&e| e as f64).sum::<f64>()
            / result.energies.len() as f64;
        println!(
            "Trials:      {} succeeded, {} failed, mean energy {:.2}",
            result.energies.len(),
            result.failed_trials,
            mean
        );
    }
}
