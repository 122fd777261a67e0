use crate::core::forcefield::params::ContactEnergyTable;
use crate::core::forcefield::scoring::EnergyScorer;
use crate::core::models::residue::Sequence;
use crate::engine::config::FoldConfig;
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::Solution;
use crate::engine::strategies::{SearchStrategy, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct FoldResult {
    /// Lowest-energy fold over all trials; the earliest trial wins ties.
    pub best: Solution,
    /// Energy of every successful trial, in trial order.
    pub energies: Vec<i32>,
    /// Trials that ran out of construction attempts.
    pub failed_trials: usize,
}

#[instrument(skip_all, name = "fold_workflow", fields(sequence = %sequence, strategy = config.strategy.name()))]
pub fn run(
    sequence: &Sequence,
    config: &FoldConfig,
    reporter: &ProgressReporter,
) -> Result<FoldResult, EngineError> {
    // === Phase 0: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let strategy = Strategy::try_from(&config.strategy)?;
    let table = match &config.contact_table {
        Some(path) => {
            info!(path = %path.display(), "Loading contact energy table.");
            ContactEnergyTable::load(path)?
        }
        None => ContactEnergyTable::default(),
    };
    let scorer = EnergyScorer::new(table);
    let context = SearchContext::new(sequence, config.dimension, &scorer);
    info!(
        residues = sequence.len(),
        dimension = %config.dimension,
        trials = config.trials,
        seed = ?config.seed,
        "Starting fold workflow."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Independent trials ===
    reporter.report(Progress::PhaseStart { name: "Folding" });
    reporter.report(Progress::TaskStart {
        total_steps: config.trials as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..config.trials;

    #[cfg(feature = "parallel")]
    let iterator = (0..config.trials).into_par_iter();

    let outcomes: Vec<Result<Solution, EngineError>> = iterator
        .map(|trial| {
            let outcome = run_trial(&context, &strategy, config.seed, trial);
            let energy = outcome.as_ref().ok().map(|solution| solution.energy);
            reporter.trial_finished(trial, energy);
            outcome
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Collect results ===
    let result = collect_results(outcomes, config.trials)?;
    info!(
        best_energy = result.best.energy,
        successful = result.energies.len(),
        failed = result.failed_trials,
        "Workflow complete."
    );
    Ok(result)
}

fn run_trial(
    context: &SearchContext,
    strategy: &Strategy,
    seed: Option<u64>,
    trial: usize,
) -> Result<Solution, EngineError> {
    let mut rng = match seed {
        Some(base) => StdRng::seed_from_u64(base.wrapping_add(trial as u64)),
        None => StdRng::from_entropy(),
    };
    strategy.search(context, &mut rng)
}

fn collect_results(
    outcomes: Vec<Result<Solution, EngineError>>,
    trials: usize,
) -> Result<FoldResult, EngineError> {
    let mut best: Option<Solution> = None;
    let mut energies = Vec::with_capacity(outcomes.len());
    let mut failed_trials = 0;

    for (trial, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(solution) => {
                energies.push(solution.energy);
                if best.as_ref().is_none_or(|b| solution.energy < b.energy) {
                    best = Some(solution);
                }
            }
            Err(EngineError::AttemptsExhausted { attempts }) => {
                warn!(trial, attempts, "Trial failed to complete a fold.");
                failed_trials += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let best = best.ok_or(EngineError::NoSolution { trials })?;
    Ok(FoldResult {
        best,
        energies,
        failed_trials,
    })
}
