//! Mutable per-trial allocation state: which groups sit at which session.

use crate::models::{Group, Session};

/// A mapping `session index -> ordered list of group indices`, plus the
/// reverse lookup and running per-session load, mutated by
/// [`crate::placement`] and [`crate::repair`].
///
/// A trial owns exactly one `AllocationState`: it starts empty, is mutated
/// only by the two passes, and is either snapshotted as the best result or
/// discarded. `Session`/`Group` data itself is immutable and shared by
/// reference across every trial.
pub struct AllocationState<'a> {
    sessions: &'a [Session],
    groups: &'a [Group],
    schedule: Vec<Vec<usize>>,
    location: Vec<Option<usize>>,
    load: Vec<u32>,
}

impl<'a> AllocationState<'a> {
    /// An empty state over the given sessions and groups, ready for
    /// [`crate::placement::initial_placement`].
    pub fn new(sessions: &'a [Session], groups: &'a [Group]) -> Self {
        Self {
            sessions,
            groups,
            schedule: vec![Vec::new(); sessions.len()],
            location: vec![None; groups.len()],
            load: vec![0; sessions.len()],
        }
    }

    pub fn num_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn session(&self, sidx: usize) -> &Session {
        &self.sessions[sidx]
    }

    pub fn group(&self, gidx: usize) -> &Group {
        &self.groups[gidx]
    }

    /// Current total player count at session `sidx`.
    pub fn load(&self, sidx: usize) -> u32 {
        self.load[sidx]
    }

    /// `max(sidx) - load(sidx)`, the remaining-capacity sort key used by
    /// polite placement.
    pub fn remaining_capacity(&self, sidx: usize) -> i64 {
        self.sessions[sidx].max as i64 - self.load[sidx] as i64
    }

    /// Whether group `gidx` (size `size`) would fit at session `sidx`
    /// without exceeding its `max`.
    pub fn fits(&self, sidx: usize, size: usize) -> bool {
        self.load[sidx] as usize + size <= self.sessions[sidx].max as usize
    }

    pub fn is_placed(&self, gidx: usize) -> bool {
        self.location[gidx].is_some()
    }

    pub fn location_of(&self, gidx: usize) -> Option<usize> {
        self.location[gidx]
    }

    pub fn groups_at(&self, sidx: usize) -> &[usize] {
        &self.schedule[sidx]
    }

    /// Seats group `gidx` at session `sidx`. Panics if `gidx` is already
    /// placed somewhere — callers must [`Self::remove`] first to move it.
    pub fn place(&mut self, gidx: usize, sidx: usize) {
        assert!(
            self.location[gidx].is_none(),
            "group {gidx} is already placed; remove it before re-placing"
        );
        self.schedule[sidx].push(gidx);
        self.load[sidx] += self.groups[gidx].size() as u32;
        self.location[gidx] = Some(sidx);
    }

    /// Removes group `gidx` from its current session and returns that
    /// session's index. Panics if the group is not currently placed.
    pub fn remove(&mut self, gidx: usize) -> usize {
        let sidx = self.location[gidx].expect("group is not placed");
        self.schedule[sidx].retain(|&g| g != gidx);
        self.load[sidx] -= self.groups[gidx].size() as u32;
        self.location[gidx] = None;
        sidx
    }

    /// Group indices with no session assigned yet.
    pub fn unplaced(&self) -> Vec<usize> {
        (0..self.groups.len())
            .filter(|&g| self.location[g].is_none())
            .collect()
    }
}
