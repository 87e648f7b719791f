//! Pre-trial structural validation, raised as `AllocatorError::InvalidInput`
//! before any trial runs.

use crate::error::AllocatorError;
use crate::models::{is_valid_score, AllocationInput};
use std::collections::HashSet;

/// Checks the structural invariants of an [`AllocationInput`] that must hold
/// before any trial is attempted. Capacity-window validity, id uniqueness,
/// non-empty groups, and the preference table's references and score range
/// are all checked here; none of this depends on randomness.
pub fn validate(input: &AllocationInput) -> Result<(), AllocatorError> {
    if input.solver.n_trials == 0 {
        return Err(AllocatorError::InvalidInput(
            "n_trials must be at least 1".to_string(),
        ));
    }

    let mut session_ids = HashSet::new();
    for s in &input.sessions {
        if !(1 <= s.min && s.min <= s.optimal && s.optimal <= s.max) {
            return Err(AllocatorError::InvalidInput(format!(
                "session {:?} has an invalid capacity window (min={}, optimal={}, max={})",
                s.id, s.min, s.optimal, s.max
            )));
        }
        if !session_ids.insert(s.id.clone()) {
            return Err(AllocatorError::InvalidInput(format!(
                "duplicate session id {:?}",
                s.id
            )));
        }
    }

    let mut group_ids = HashSet::new();
    for g in &input.groups {
        if g.player_ids.is_empty() {
            return Err(AllocatorError::InvalidInput(format!(
                "group {:?} has no players",
                g.id
            )));
        }
        if !group_ids.insert(g.id.clone()) {
            return Err(AllocatorError::InvalidInput(format!(
                "duplicate group id {:?}",
                g.id
            )));
        }
    }

    for (gid, row) in &input.preferences.scores {
        if !group_ids.contains(gid) {
            return Err(AllocatorError::InvalidInput(format!(
                "preference table references unknown group {:?}",
                gid
            )));
        }
        for (sid, score) in row {
            if !session_ids.contains(sid) {
                return Err(AllocatorError::InvalidInput(format!(
                    "preference table references unknown session {:?}",
                    sid
                )));
            }
            if !is_valid_score(*score) {
                return Err(AllocatorError::InvalidInput(format!(
                    "preference score {score} for group {gid:?} / session {sid:?} \
                     is not one of 0..=5 or 20"
                )));
            }
        }
    }

    Ok(())
}
