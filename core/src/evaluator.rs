//! Computes total loss and diagnostic histograms from a finished allocation.

use crate::models::AllocationReport;
use crate::preference::PreferenceModel;
use crate::state::AllocationState;
use std::collections::BTreeMap;

/// Computes the size-weighted total loss, the loss
/// histogram (tier -> player-seats at that tier), and the delta-from-optimal
/// histogram (`load - optimal` -> session count) for a finished state.
pub fn evaluate(state: &AllocationState, model: &PreferenceModel, trial_index: u32) -> AllocationReport {
    let mut total_loss: u64 = 0;
    let mut loss_histogram: BTreeMap<u32, u64> = BTreeMap::new();
    let mut assignments = Vec::with_capacity(state.num_groups());

    for sidx in 0..state.num_sessions() {
        for &gidx in state.groups_at(sidx) {
            let tier = model.loss(gidx, sidx);
            let size = state.group(gidx).size() as u64;
            total_loss += size * tier as u64;
            *loss_histogram.entry(tier).or_insert(0) += size;
            assignments.push(crate::models::AllocationRecord {
                group_id: state.group(gidx).id.clone(),
                session_id: state.session(sidx).id.clone(),
            });
        }
    }

    let mut delta_histogram: BTreeMap<i64, u64> = BTreeMap::new();
    for sidx in 0..state.num_sessions() {
        let delta = state.load(sidx) as i64 - state.session(sidx).optimal as i64;
        *delta_histogram.entry(delta).or_insert(0) += 1;
    }

    AllocationReport {
        assignments,
        total_loss,
        loss_histogram,
        delta_histogram,
        trial_index,
    }
}
