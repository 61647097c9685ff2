use serde::{Deserialize, Serialize};

use crate::fatigue::domain::fatigue_state::ResetScope;

/// What to do when the tracked face disappears.
///
/// Unusable frames (no face, landmarks out of range, degenerate geometry)
/// all count as misses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLossPolicy {
    /// Consecutive misses before fatigue state is reset. 0 and 1 both
    /// reset on the first miss.
    pub reset_after_misses: u32,
    /// Also clear lifetime drowsy and yawn counters on reset.
    pub reset_counters: bool,
}

impl FaceLossPolicy {
    pub fn scope(&self) -> ResetScope {
        if self.reset_counters {
            ResetScope::All
        } else {
            ResetScope::Runs
        }
    }
}

/// Counts consecutive misses and decides when a loss episode should reset.
#[derive(Debug, Default)]
pub struct MissTracker {
    policy: FaceLossPolicy,
    streak: u32,
    reset_done: bool,
}

impl MissTracker {
    pub fn new(policy: FaceLossPolicy) -> Self {
        Self {
            policy,
            streak: 0,
            reset_done: false,
        }
    }

    pub fn policy(&self) -> &FaceLossPolicy {
        &self.policy
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Registers a miss; returns the scope to reset with, at most once per
    /// loss episode.
    pub fn miss(&mut self) -> Option<ResetScope> {
        self.streak = self.streak.saturating_add(1);
        if self.reset_done || self.streak < self.policy.reset_after_misses.max(1) {
            return None;
        }
        self.reset_done = true;
        Some(self.policy.scope())
    }

    /// Registers a usable frame, ending any loss episode.
    pub fn hit(&mut self) {
        self.streak = 0;
        self.reset_done = false;
    }
}
