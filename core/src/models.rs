//! Public API types for the tabletop session allocator.
//!
//! These are the serializable input and output contracts: a caller builds an
//! [`AllocationInput`] describing one time slot's sessions, groups, and
//! preferences, hands it to [`crate::run_allocator`] or
//! [`crate::run_allocator_parallel`], and gets back an [`AllocationReport`] or
//! an [`crate::error::AllocatorError`].
//!
//! # Example
//!
//! ```no_run
//! use alloc_core::models::*;
//! use std::collections::HashMap;
//!
//! let input = AllocationInput {
//!     sessions: vec![
//!         Session { id: "A".into(), min: 1, optimal: 3, max: 4, metadata: HashMap::new() },
//!         Session { id: "B".into(), min: 1, optimal: 3, max: 4, metadata: HashMap::new() },
//!     ],
//!     groups: vec![
//!         Group { id: "g1".into(), player_ids: vec!["alice".into()], avg_compensation: 0.0 },
//!     ],
//!     preferences: PreferenceTable::default(),
//!     solver: AllocatorConfig { run_seed: 0, n_trials: 10, logging: LoggingOptions::default() },
//! };
//!
//! match alloc_core::run_allocator(&input) {
//!     Ok(report) => println!("total loss: {}", report.total_loss),
//!     Err(e) => eprintln!("allocation failed: {e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A session (table allocation) identifier.
pub type SessionId = String;
/// A group identifier.
pub type GroupId = String;
/// A player identifier. Opaque to the allocator beyond group membership.
pub type PlayerId = String;

/// An ordinal preference score a group assigns to a session.
///
/// Valid values are `0..=5` plus `20` (the "Golden D20" bonus). A missing
/// entry in [`PreferenceTable`] defaults to [`DEFAULT_PREFERENCE_SCORE`].
pub type PreferenceScore = u8;

/// The score assumed for a `(group, session)` pair with no explicit entry.
pub const DEFAULT_PREFERENCE_SCORE: PreferenceScore = 3;
/// The "Golden D20" bonus score: a rare, strong positive signal.
pub const GOLDEN_D20_SCORE: PreferenceScore = 20;

/// Whether `score` is one of the seven scores the allocator accepts.
pub fn is_valid_score(score: PreferenceScore) -> bool {
    matches!(score, 0..=5) || score == GOLDEN_D20_SCORE
}

/// One scheduled game session within the time slot being allocated.
///
/// Capacity is a window `(min, optimal, max)` with `1 <= min <= optimal <=
/// max`. `metadata` is opaque to the allocator; it is round-tripped for the
/// caller's benefit (e.g. game title, GM name).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub min: u32,
    pub optimal: u32,
    pub max: u32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// An atomic placement unit: one or more players who are always seated
/// together or not at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub player_ids: Vec<PlayerId>,
    /// Average compensation carried from prior time slots. Currently
    /// informational only; no component in this crate reads it.
    #[serde(default)]
    pub avg_compensation: f64,
}

impl Group {
    /// Number of players in this group. Always `>= 1` for a validated input.
    pub fn size(&self) -> usize {
        self.player_ids.len()
    }
}

/// Sparse per-group preference scores: `preferences[group_id][session_id] ->
/// score`. A missing `(group_id, session_id)` pair defaults to
/// [`DEFAULT_PREFERENCE_SCORE`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PreferenceTable {
    #[serde(flatten)]
    pub scores: HashMap<GroupId, HashMap<SessionId, PreferenceScore>>,
}

impl PreferenceTable {
    /// The score group `gid` gives session `sid`, or the default if absent.
    pub fn score(&self, gid: &str, sid: &str) -> PreferenceScore {
        self.scores
            .get(gid)
            .and_then(|row| row.get(sid))
            .copied()
            .unwrap_or(DEFAULT_PREFERENCE_SCORE)
    }
}

/// Diagnostic logging toggles for an allocation run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Emit a `log::debug!` line summarizing each trial's outcome.
    #[serde(default)]
    pub log_trial_summaries: bool,
    /// Emit a `log::info!` line with the winning trial's loss breakdown.
    #[serde(default)]
    pub log_final_breakdown: bool,
}

fn default_n_trials() -> u32 {
    10
}

/// Tuning knobs for the allocator run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AllocatorConfig {
    /// Seeds the per-trial random streams; same `run_seed` and input always
    /// produce the same output.
    pub run_seed: u64,
    /// Number of randomized restart trials to attempt. Must be `>= 1`.
    #[serde(default = "default_n_trials")]
    pub n_trials: u32,
    #[serde(default)]
    pub logging: LoggingOptions,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            run_seed: 0,
            n_trials: default_n_trials(),
            logging: LoggingOptions::default(),
        }
    }
}

/// A complete time-slot allocation problem.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AllocationInput {
    pub sessions: Vec<Session>,
    pub groups: Vec<Group>,
    #[serde(default)]
    pub preferences: PreferenceTable,
    pub solver: AllocatorConfig,
}

/// One `(group, session)` pairing in the final allocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    pub group_id: GroupId,
    pub session_id: SessionId,
}

/// The winning trial's assignment together with the Evaluator's diagnostics.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AllocationReport {
    /// Every input group appears exactly once.
    pub assignments: Vec<AllocationRecord>,
    /// `sum(|group| * loss(group, session))` over the final assignment (P7).
    pub total_loss: u64,
    /// Tier index -> number of player-seats placed at that tier.
    pub loss_histogram: BTreeMap<u32, u64>,
    /// `load(session) - optimal(session) -> count of sessions`, sorted by key.
    pub delta_histogram: BTreeMap<i64, u64>,
    /// 0-based index of the winning trial, for reproducing this exact result.
    pub trial_index: u32,
}

impl AllocationReport {
    /// A compact human-readable rendering of the winning trial's diagnostics.
    pub fn display(&self) -> String {
        let mut out = format!(
            "total_loss={} (trial #{})\n",
            self.total_loss, self.trial_index
        );
        out.push_str("loss_histogram:\n");
        for (tier, count) in &self.loss_histogram {
            out.push_str(&format!("  tier {tier}: {count} seat(s)\n"));
        }
        out.push_str("delta_histogram:\n");
        for (delta, count) in &self.delta_histogram {
            out.push_str(&format!("  delta {delta}: {count} session(s)\n"));
        }
        out
    }
}
