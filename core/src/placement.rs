//! First pass: seat every group at its best-available loss tier, bumping an
//! equal-or-worse-off incumbent to make room when no session accepts a
//! newcomer politely.

use crate::error::AllocatorError;
use crate::preference::{PreferenceModel, ShuffledTiers};
use crate::state::AllocationState;

/// Runs polite seating followed by bump-with-monotonicity over
/// `group_order`. Every group in `group_order` ends up placed, or the first
/// unplaceable one aborts the whole pass with `UnplaceableGroup`.
pub fn initial_placement(
    state: &mut AllocationState,
    model: &PreferenceModel,
    tiers: &ShuffledTiers,
    group_order: &[usize],
) -> Result<(), AllocatorError> {
    for &gidx in group_order {
        place_one(state, model, tiers, gidx)?;
    }
    Ok(())
}

fn place_one(
    state: &mut AllocationState,
    model: &PreferenceModel,
    tiers: &ShuffledTiers,
    gidx: usize,
) -> Result<(), AllocatorError> {
    let size = state.group(gidx).size();
    let max_tier = model.max_tier(gidx);

    // Pass 1: polite seating. Walk tiers best-first; within a tier, try the
    // emptiest session first (ties broken by the trial's shuffled order).
    for tier in 0..=max_tier {
        let mut candidates: Vec<usize> = tiers.tier(gidx, tier).to_vec();
        candidates.sort_by_key(|&sidx| std::cmp::Reverse(state.remaining_capacity(sidx)));
        for sidx in candidates {
            if state.fits(sidx, size) {
                state.place(gidx, sidx);
                return Ok(());
            }
        }
    }

    // Pass 2: bump-with-monotonicity. Walk tiers best-first again, this time
    // in the trial's shuffled order directly (no capacity resort), looking
    // for an incumbent we can displace without regressing its loss.
    for tier in 0..=max_tier {
        for &sidx in tiers.tier(gidx, tier) {
            let loss_g = model.loss(gidx, sidx);
            for h in state.groups_at(sidx).to_vec() {
                let loss_h = model.loss(h, sidx);
                if loss_h < loss_g {
                    continue;
                }
                let h_size = state.group(h).size();
                // Room for g at sidx once h's seats are freed?
                if state.remaining_capacity(sidx) + h_size as i64 < size as i64 {
                    continue;
                }
                for &s_prime in tiers.tier(h, loss_h) {
                    if s_prime == sidx {
                        continue;
                    }
                    if state.fits(s_prime, h_size) {
                        state.remove(h);
                        state.place(gidx, sidx);
                        state.place(h, s_prime);
                        return Ok(());
                    }
                }
            }
        }
    }

    Err(AllocatorError::UnplaceableGroup(state.group(gidx).id.clone()))
}
