//! Transforms raw ordinal preferences into per-group loss tiers.

use crate::models::{AllocationInput, GroupId, SessionId};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Per-group loss tiers, built once from the input and shared immutably
/// across every trial.
///
/// `loss(gidx, sidx)` is a pure function of preference scores, so it is
/// computed eagerly here as a dense `|groups| x |sessions|` matrix rather
/// than recomputed per trial — the Design Notes call for dense storage
/// "when the product is small", which is the expected regime for a single
/// time slot.
///
/// [`PreferenceModel::tiers`] returns the *unshuffled* canonical ordering;
/// the per-trial within-tier randomization is applied by
/// the caller ([`crate::placement`] / [`crate::repair`]) against a cloned
/// copy of a tier's session list, so this struct itself never changes
/// between trials and needs no synchronization to share.
#[derive(Debug, Clone)]
pub struct PreferenceModel {
    group_idx: HashMap<GroupId, usize>,
    session_idx: HashMap<SessionId, usize>,
    session_ids: Vec<SessionId>,
    /// `loss[gidx][sidx]` = tier index of session `sidx` in group `gidx`'s preferences.
    loss: Vec<Vec<u32>>,
    /// `tiers[gidx][tier]` = session indices at that tier, best (score-descending) first.
    tiers: Vec<Vec<Vec<usize>>>,
}

impl PreferenceModel {
    /// Builds the model from the full input: scores are grouped by value,
    /// sorted score-descending, and assigned tier indices 0, 1, 2, ... in
    /// that order. A session absent from a group's preferences folds into
    /// the tier for the default score.
    pub fn build(input: &AllocationInput) -> Self {
        let session_ids: Vec<SessionId> = input.sessions.iter().map(|s| s.id.clone()).collect();
        let session_idx: HashMap<SessionId, usize> = session_ids
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, s)| (s, i))
            .collect();
        let group_idx: HashMap<GroupId, usize> = input
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect();

        let mut loss = Vec::with_capacity(input.groups.len());
        let mut tiers = Vec::with_capacity(input.groups.len());

        for group in &input.groups {
            let mut by_score: BTreeMap<Reverse<u8>, Vec<usize>> = BTreeMap::new();
            for (sidx, sid) in session_ids.iter().enumerate() {
                let score = input.preferences.score(&group.id, sid);
                by_score.entry(Reverse(score)).or_default().push(sidx);
            }
            let group_tiers: Vec<Vec<usize>> = by_score.into_values().collect();

            let mut group_loss = vec![0u32; session_ids.len()];
            for (tier_idx, sessions_at_tier) in group_tiers.iter().enumerate() {
                for &sidx in sessions_at_tier {
                    group_loss[sidx] = tier_idx as u32;
                }
            }

            loss.push(group_loss);
            tiers.push(group_tiers);
        }

        Self {
            group_idx,
            session_idx,
            session_ids,
            loss,
            tiers,
        }
    }

    pub fn group_index(&self, gid: &str) -> Option<usize> {
        self.group_idx.get(gid).copied()
    }

    pub fn session_index(&self, sid: &str) -> Option<usize> {
        self.session_idx.get(sid).copied()
    }

    pub fn session_id(&self, sidx: usize) -> &str {
        &self.session_ids[sidx]
    }

    pub fn num_sessions(&self) -> usize {
        self.session_ids.len()
    }

    /// The tier index of placing group `gidx` at session `sidx` — this IS
    /// the loss contribution of that placement.
    pub fn loss(&self, gidx: usize, sidx: usize) -> u32 {
        self.loss[gidx][sidx]
    }

    /// All of group `gidx`'s tiers, best (tier 0) first, in canonical
    /// (unshuffled) order.
    pub fn tiers(&self, gidx: usize) -> &[Vec<usize>] {
        &self.tiers[gidx]
    }

    /// The sessions at a specific tier for a group, or an empty slice if the
    /// group has no tier at that index (it only has coarser tiers).
    pub fn tier_at(&self, gidx: usize, tier: u32) -> &[usize] {
        self.tiers[gidx]
            .get(tier as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest tier index present for this group (its worst tier).
    pub fn max_tier(&self, gidx: usize) -> u32 {
        self.tiers[gidx].len().saturating_sub(1) as u32
    }

    pub fn num_groups(&self) -> usize {
        self.loss.len()
    }
}

/// A per-trial, within-tier-shuffled view of a [`PreferenceModel`]'s tiers.
///
/// The spec requires between-tier order to stay deterministic (strictly by
/// score) but within-tier order to be randomized per trial. Rather than
/// mutate the shared, immutable `PreferenceModel`, each trial builds its own
/// `ShuffledTiers` once, up front, from a clone of the canonical tier
/// vectors.
#[derive(Debug, Clone)]
pub struct ShuffledTiers {
    tiers: Vec<Vec<Vec<usize>>>,
}

impl ShuffledTiers {
    /// Shuffles a fresh copy of every group's tiers using `rng`.
    pub fn build(model: &PreferenceModel, rng: &mut impl rand::Rng) -> Self {
        use rand::seq::SliceRandom;
        let mut tiers = Vec::with_capacity(model.num_groups());
        for gidx in 0..model.num_groups() {
            let mut group_tiers: Vec<Vec<usize>> = model.tiers(gidx).to_vec();
            for tier in &mut group_tiers {
                tier.shuffle(rng);
            }
            tiers.push(group_tiers);
        }
        Self { tiers }
    }

    /// The shuffled session order at `tier` for group `gidx`, or an empty
    /// slice if the group has no tier at that index.
    pub fn tier(&self, gidx: usize, tier: u32) -> &[usize] {
        self.tiers[gidx]
            .get(tier as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
