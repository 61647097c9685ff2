use serde::{Deserialize, Serialize};

/// How much of a `FatigueState` a reset clears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    /// Clear in-progress runs only; lifetime counters survive.
    #[default]
    Runs,
    /// Clear runs and lifetime counters.
    All,
}

/// Per-subject fatigue state. Exclusively owned by one detection session.
///
/// Plain data so it can be persisted between sessions and inspected in
/// tests without a video pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueState {
    /// Consecutive frames with the averaged EAR below threshold.
    pub eye_closed_run: u32,
    /// Consecutive frames with MAR above threshold.
    pub yawn_run: u32,
    pub drowsy_event_count: u64,
    pub yawn_event_count: u64,
    /// Last frame fed to `update`, used to check input ordering.
    pub last_frame_index: Option<u64>,
}

impl FatigueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, scope: ResetScope) {
        self.eye_closed_run = 0;
        self.yawn_run = 0;
        self.last_frame_index = None;
        if scope == ResetScope::All {
            self.drowsy_event_count = 0;
            self.yawn_event_count = 0;
        }
    }
}
