// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

/// Statistics for the current array. They only ever go up, until the array is replaced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunCounters {
    /// Passes that performed at least one swap. The final pass that confirms the array
    /// is sorted (no swaps) is not counted.
    pub iterations: u32,
    pub comparisons: u32,
    pub swaps: u32,
}

/// - `running`: the user's intent, "advance the sort".
/// - `sorting`: a driver is actively walking the algorithm.
/// - `complete`: the algorithm has terminated. Cleared by a reset, or by starting a new
///   run over the sorted array.
///
/// Invariant: `complete` implies `!sorting && !running`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunControlState {
    pub running: bool,
    pub sorting: bool,
    pub complete: bool,
}

/// Coarse view of [`RunControlState`] for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RunPhase {
    Idle,
    /// Paused by the user, waiting for the driver to reach a comparison boundary.
    Pausing,
    Sorting,
    Complete,
}

impl RunControlState {
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        match (self.complete, self.sorting, self.running) {
            (true, _, _) => RunPhase::Complete,
            (false, true, true) => RunPhase::Sorting,
            (false, true, false) => RunPhase::Pausing,
            (false, false, _) => RunPhase::Idle,
        }
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.complete || (!self.sorting && !self.running)
    }
}
