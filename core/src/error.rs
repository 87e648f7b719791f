//! Error types returned by the allocator.

use thiserror::Error;

/// Errors that can occur while building or running an allocation.
///
/// `InvalidInput` is raised before any trial runs and is always fatal.
/// `UnplaceableGroup` and `CannotRepair` are per-trial failures: `TrialDriver`
/// records them and moves on to the next trial. `NoFeasibleAllocation` is
/// surfaced only once every trial has failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocatorError {
    /// The input failed structural validation (bad capacity window, duplicate
    /// id, empty group, unknown preference reference, out-of-range score, or
    /// `n_trials == 0`). Fatal, surfaced before any trial runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Neither polite seating nor bump-with-monotonicity could place this
    /// group at any session. Per-trial; the driver records it and retries.
    #[error("group {0:?} could not be placed at any session")]
    UnplaceableGroup(String),

    /// A session under its minimum could not be filled without regressing a
    /// moved group's loss or pulling a donor below its own optimal. Per-trial.
    #[error("session {0:?} could not be repaired to its minimum capacity")]
    CannotRepair(String),

    /// Every trial failed. Fatal for the run.
    #[error("no feasible allocation found after {0} trial(s)")]
    NoFeasibleAllocation(u32),
}
