//! Runs a fixed number of randomized restart trials and keeps the best.

use crate::error::AllocatorError;
use crate::evaluator;
use crate::models::{AllocationInput, AllocationReport, LoggingOptions};
use crate::placement::initial_placement;
use crate::preference::{PreferenceModel, ShuffledTiers};
use crate::repair::capacity_repair;
use crate::rng::trial_rng;
use crate::state::AllocationState;
use rand::seq::SliceRandom;

/// Runs trial `trial_index` to completion: build a shuffled tier view, shuffle
/// the group placement order, run polite seating + bump, then capacity
/// repair. Returns the evaluated report on success.
fn run_trial(
    input: &AllocationInput,
    model: &PreferenceModel,
    trial_index: u32,
) -> Result<AllocationReport, AllocatorError> {
    let mut rng = trial_rng(input.solver.run_seed, trial_index);
    let tiers = ShuffledTiers::build(model, &mut rng);

    let mut order: Vec<usize> = (0..input.groups.len()).collect();
    order.shuffle(&mut rng);

    let mut state = AllocationState::new(&input.sessions, &input.groups);
    initial_placement(&mut state, model, &tiers, &order)?;
    capacity_repair(&mut state, model, &mut rng)?;

    let report = evaluator::evaluate(&state, model, trial_index);
    if input.solver.logging.log_trial_summaries {
        log::debug!(
            "trial {trial_index}: total_loss={}",
            report.total_loss
        );
    }
    Ok(report)
}

/// Picks the better of two reports: lower `total_loss` wins; ties break on
/// the earlier `trial_index` so the result is independent of fold order.
fn better(a: AllocationReport, b: AllocationReport) -> AllocationReport {
    if (b.total_loss, b.trial_index) < (a.total_loss, a.trial_index) {
        b
    } else {
        a
    }
}

/// Runs `input.solver.n_trials` trials sequentially and returns the best.
///
/// Per-trial failures ([`AllocatorError::UnplaceableGroup`],
/// [`AllocatorError::CannotRepair`]) are absorbed and the trial is skipped;
/// only [`AllocatorError::NoFeasibleAllocation`] escapes, and only once every
/// trial has failed this way.
pub fn run_allocator(input: &AllocationInput) -> Result<AllocationReport, AllocatorError> {
    crate::validation::validate(input)?;
    let model = PreferenceModel::build(input);

    let mut best: Option<AllocationReport> = None;
    for trial_index in 0..input.solver.n_trials {
        match run_trial(input, &model, trial_index) {
            Ok(report) => {
                best = Some(match best {
                    Some(current) => better(current, report),
                    None => report,
                });
            }
            Err(AllocatorError::UnplaceableGroup(_)) | Err(AllocatorError::CannotRepair(_)) => {
                continue;
            }
            Err(other) => return Err(other),
        }
    }

    let report = best.ok_or(AllocatorError::NoFeasibleAllocation(input.solver.n_trials))?;
    log_final_breakdown(&input.solver.logging, &report);
    Ok(report)
}

/// Same contract as [`run_allocator`], but runs every trial concurrently via
/// `rayon` and folds results with [`better`] — a commutative, associative
/// reduction, so the winner is identical to the sequential run regardless of
/// thread scheduling.
pub fn run_allocator_parallel(input: &AllocationInput) -> Result<AllocationReport, AllocatorError> {
    use rayon::prelude::*;

    crate::validation::validate(input)?;
    let model = PreferenceModel::build(input);

    let best = (0..input.solver.n_trials)
        .into_par_iter()
        .filter_map(|trial_index| match run_trial(input, &model, trial_index) {
            Ok(report) => Some(report),
            Err(AllocatorError::UnplaceableGroup(_)) | Err(AllocatorError::CannotRepair(_)) => None,
            Err(_) => None,
        })
        .reduce_with(better);

    let report = best.ok_or(AllocatorError::NoFeasibleAllocation(input.solver.n_trials))?;
    log_final_breakdown(&input.solver.logging, &report);
    Ok(report)
}

fn log_final_breakdown(logging: &LoggingOptions, report: &AllocationReport) {
    if logging.log_final_breakdown {
        log::info!("{}", report.display());
    }
}
