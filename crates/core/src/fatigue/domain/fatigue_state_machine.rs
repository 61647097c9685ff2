//! Debounced drowsiness and yawn detection over per-frame ratio samples.
//!
//! The two sub-machines commit at different moments. Eye closure alerts on
//! entry: the frame the closed run reaches `sustained_frames` fires one
//! `DrowsyAlert`, and nothing more fires until the eyes reopen. A yawn
//! commits on exit: it is only counted once a qualifying open-mouth run
//! ends, so a mouth still open when the face is lost never counts.

use super::fatigue_event::FatigueEvent;
use super::fatigue_state::{FatigueState, ResetScope};
use super::ratio_calculator::RatioSample;
use super::thresholds::{ThresholdError, Thresholds};

pub struct FatigueStateMachine {
    thresholds: Thresholds,
    state: FatigueState,
}

impl FatigueStateMachine {
    pub fn new(thresholds: Thresholds) -> Result<Self, ThresholdError> {
        Self::with_state(thresholds, FatigueState::new())
    }

    /// Resumes from a previously persisted state.
    pub fn with_state(
        thresholds: Thresholds,
        state: FatigueState,
    ) -> Result<Self, ThresholdError> {
        thresholds.validate()?;
        Ok(Self { thresholds, state })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn state(&self) -> &FatigueState {
        &self.state
    }

    pub fn into_state(self) -> FatigueState {
        self.state
    }

    /// Feeds one frame and returns the events it produced, drowsy first.
    ///
    /// Samples must arrive in strictly increasing `frame_index` order for
    /// a given subject; this is checked in debug builds only.
    pub fn update(&mut self, sample: &RatioSample) -> Vec<FatigueEvent> {
        debug_assert!(
            self.state
                .last_frame_index
                .map_or(true, |last| sample.frame_index > last),
            "frame indices must be strictly increasing"
        );
        self.state.last_frame_index = Some(sample.frame_index);

        let sustained = self.thresholds.sustained_frames;
        let mut events = Vec::new();

        if sample.avg_ear < self.thresholds.ear_threshold {
            self.state.eye_closed_run = self.state.eye_closed_run.saturating_add(1);
        } else {
            self.state.eye_closed_run = 0;
        }

        // Equality, not >=: one alert per closure episode.
        if self.state.eye_closed_run == sustained {
            self.state.drowsy_event_count += 1;
            events.push(FatigueEvent::DrowsyAlert {
                frame_index: sample.frame_index,
                closed_frames: self.state.eye_closed_run,
            });
        }

        if sample.mar > self.thresholds.mar_threshold {
            self.state.yawn_run = self.state.yawn_run.saturating_add(1);
        } else {
            let finished = std::mem::take(&mut self.state.yawn_run);
            if finished >= sustained {
                self.state.yawn_event_count += 1;
                events.push(FatigueEvent::YawnCompleted {
                    frame_index: sample.frame_index,
                    duration_frames: finished,
                });
            }
        }

        events
    }

    /// Eyes are currently past the sustained-closure point.
    ///
    /// Stays true after the one-shot `DrowsyAlert` for as long as the eyes
    /// remain closed; display layers use it for persistent alert text.
    pub fn is_alerting(&self) -> bool {
        self.state.eye_closed_run >= self.thresholds.sustained_frames
    }

    /// The current open-mouth run is long enough to count once it ends.
    pub fn is_yawning(&self) -> bool {
        self.state.yawn_run >= self.thresholds.sustained_frames
    }

    /// Drops in-progress runs, e.g. when the tracked face is lost.
    ///
    /// A qualifying yawn still in progress is discarded without an event.
    pub fn reset(&mut self, scope: ResetScope) {
        log::debug!(
            "Resetting fatigue state ({scope:?}): eye run {}, yawn run {}",
            self.state.eye_closed_run,
            self.state.yawn_run
        );
        self.state.reset(scope);
    }
}
