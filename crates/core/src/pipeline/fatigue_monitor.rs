use crate::detection::domain::landmark_mapping::LandmarkMapping;
use crate::detection::domain::landmark_source::LandmarkObservation;
use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use crate::fatigue::domain::fatigue_state::FatigueState;
use crate::fatigue::domain::fatigue_state_machine::FatigueStateMachine;
use crate::fatigue::domain::ratio_calculator::RatioSample;
use crate::pipeline::face_loss_policy::{FaceLossPolicy, MissTracker};
use crate::pipeline::frame_report::{FrameReport, SessionSummary};

/// Per-frame driver for one tracked subject.
///
/// Turns landmark observations into ratio samples, feeds the state
/// machine, applies the face-loss policy and fans events out to sinks.
/// Frames that cannot be scored never reach the state machine.
pub struct FatigueMonitor {
    mapping: LandmarkMapping,
    machine: FatigueStateMachine,
    sinks: Vec<Box<dyn FatigueEventSink>>,
    misses: MissTracker,
    summary: SessionSummary,
    ear_sum: f64,
    mar_sum: f64,
    scored: u64,
}

impl FatigueMonitor {
    pub fn new(
        mapping: LandmarkMapping,
        machine: FatigueStateMachine,
        sinks: Vec<Box<dyn FatigueEventSink>>,
        loss_policy: FaceLossPolicy,
    ) -> Self {
        Self {
            mapping,
            machine,
            sinks,
            misses: MissTracker::new(loss_policy),
            summary: SessionSummary::default(),
            ear_sum: 0.0,
            mar_sum: 0.0,
            scored: 0,
        }
    }

    pub fn state(&self) -> &FatigueState {
        self.machine.state()
    }

    pub fn process(&mut self, observation: &LandmarkObservation) -> FrameReport {
        self.summary.frames += 1;

        let sample = match self.score(observation) {
            Some(sample) => sample,
            None => {
                self.handle_miss();
                return self.report(observation.frame_index, None, Vec::new());
            }
        };

        self.misses.hit();
        self.scored += 1;
        self.ear_sum += sample.avg_ear;
        self.mar_sum += sample.mar;

        let events = self.machine.update(&sample);
        for event in &events {
            if event.is_drowsy_alert() {
                self.summary.drowsy_events += 1;
            } else {
                self.summary.yawn_events += 1;
            }
            for sink in &mut self.sinks {
                sink.on_event(event);
            }
        }

        self.report(observation.frame_index, Some(sample), events)
    }

    /// Totals so far; means are over scored frames only.
    pub fn summary(&self) -> SessionSummary {
        let mut summary = self.summary.clone();
        if self.scored > 0 {
            summary.mean_ear = Some(self.ear_sum / self.scored as f64);
            summary.mean_mar = Some(self.mar_sum / self.scored as f64);
        }
        summary
    }

    fn score(&mut self, observation: &LandmarkObservation) -> Option<RatioSample> {
        let mesh = match &observation.mesh {
            Some(mesh) => mesh,
            None => {
                self.summary.frames_without_face += 1;
                return None;
            }
        };

        let scored = self
            .mapping
            .extract(mesh, observation.width, observation.height)
            .map_err(|e| e.to_string())
            .and_then(|points| {
                RatioSample::from_face(&points, observation.frame_index).map_err(|e| e.to_string())
            });

        match scored {
            Ok(sample) => Some(sample),
            Err(reason) => {
                log::debug!("Skipping frame {}: {reason}", observation.frame_index);
                self.summary.frames_skipped += 1;
                None
            }
        }
    }

    fn handle_miss(&mut self) {
        if let Some(scope) = self.misses.miss() {
            log::debug!(
                "Face missing for {} frames, resetting ({scope:?})",
                self.misses.streak()
            );
            self.machine.reset(scope);
            self.summary.resets += 1;
            for sink in &mut self.sinks {
                sink.on_reset(scope);
            }
        }
    }

    fn report(
        &self,
        frame_index: u64,
        sample: Option<RatioSample>,
        events: Vec<FatigueEvent>,
    ) -> FrameReport {
        let state = self.machine.state();
        FrameReport {
            frame_index,
            sample,
            events,
            alerting: self.machine.is_alerting(),
            drowsy_event_count: state.drowsy_event_count,
            yawn_event_count: state.yawn_event_count,
        }
    }
}
