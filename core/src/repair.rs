//! Second pass: fill under-minimum sessions by pulling groups from
//! over-optimal sessions ("make-up numbers"), without strictly worsening any
//! moved group's loss or pulling a donor below its own optimal.

use crate::error::AllocatorError;
use crate::preference::PreferenceModel;
use crate::state::AllocationState;
use rand::seq::SliceRandom;
use rand::Rng;

/// A candidate move: group `group` currently sits at session `donor` and
/// could move to the under-minimum session without regressing its loss.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    donor: usize,
    group: usize,
}

/// Raises every under-minimum session to at least its minimum, including one
/// that currently holds zero groups. Sessions are processed in `state`'s own
/// index order; each session's donor pool is recomputed fresh since a prior
/// session's repair may have changed who still qualifies as a donor.
///
/// A session that started this call with zero groups and still can't reach
/// its minimum (no donor qualifies) is left empty rather than failing the
/// trial — an empty table is simply unused. A session that already held some
/// groups but falls short is a genuine repair failure.
pub fn capacity_repair(
    state: &mut AllocationState,
    model: &PreferenceModel,
    rng: &mut impl Rng,
) -> Result<(), AllocatorError> {
    let under: Vec<usize> = (0..state.num_sessions())
        .filter(|&s| state.load(s) < state.session(s).min)
        .collect();

    for s in under {
        repair_one(state, model, rng, s)?;
    }
    Ok(())
}

fn repair_one(
    state: &mut AllocationState,
    model: &PreferenceModel,
    rng: &mut impl Rng,
    s: usize,
) -> Result<(), AllocatorError> {
    if state.load(s) >= state.session(s).min {
        return Ok(());
    }
    let was_empty = state.load(s) == 0;

    let need_min = state.session(s).min - state.load(s);
    let need_opt = state.session(s).optimal.saturating_sub(state.load(s));

    let donors: Vec<usize> = (0..state.num_sessions())
        .filter(|&d| d != s && state.load(d) > state.session(d).optimal)
        .collect();

    // A move is only a candidate if it does not strictly worsen the mover's
    // own loss, i.e. loss(h, s) <= loss(h, d). See DESIGN.md for why this
    // reading was chosen over the worked (but invariant-violating)
    // Scenario 3 numbers.
    let mut candidates = Vec::new();
    for &d in &donors {
        for &h in state.groups_at(d) {
            let loss_at_d = model.loss(h, d);
            let loss_at_s = model.loss(h, s);
            if loss_at_s <= loss_at_d {
                candidates.push(Candidate { donor: d, group: h });
            }
        }
    }

    // Deficits are measured in player seats, and so is every candidate's
    // contribution, since a multi-player group moves all of its seats at
    // once -- never compare either against a plain move count.
    let total_candidate_seats: u32 = candidates
        .iter()
        .map(|c| state.group(c.group).size() as u32)
        .sum();
    if total_candidate_seats < need_min {
        if was_empty {
            return Ok(());
        }
        return Err(AllocatorError::CannotRepair(state.session(s).id.clone()));
    }

    candidates.shuffle(rng);

    let mut selected = Vec::new();
    let mut seats_selected = 0u32;
    let mut donor_load_after: std::collections::HashMap<usize, u32> = std::collections::HashMap::new();
    for &d in &donors {
        donor_load_after.insert(d, state.load(d));
    }

    for candidate in &candidates {
        if seats_selected >= need_opt {
            break;
        }
        let size = state.group(candidate.group).size() as u32;
        let remaining_at_donor = donor_load_after[&candidate.donor] - size;
        if remaining_at_donor < state.session(candidate.donor).optimal {
            continue;
        }
        donor_load_after.insert(candidate.donor, remaining_at_donor);
        seats_selected += size;
        selected.push(*candidate);
    }

    if seats_selected < need_min {
        if was_empty {
            return Ok(());
        }
        return Err(AllocatorError::CannotRepair(state.session(s).id.clone()));
    }

    for candidate in selected {
        state.remove(candidate.group);
        state.place(candidate.group, s);
    }

    Ok(())
}
