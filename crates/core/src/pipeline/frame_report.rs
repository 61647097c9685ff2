use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::ratio_calculator::RatioSample;
use crate::shared::constants::DROWSINESS_ALERT_TEXT;

/// Everything a display layer needs to render one processed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame_index: u64,
    /// `None` when the frame had no usable face.
    pub sample: Option<RatioSample>,
    pub events: Vec<FatigueEvent>,
    /// Eyes are past the sustained-closure point on this frame.
    pub alerting: bool,
    pub drowsy_event_count: u64,
    pub yawn_event_count: u64,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[frame {}] ", self.frame_index)?;
        match &self.sample {
            Some(s) => write!(f, "EAR: {:.2}  MAR: {:.2}", s.avg_ear, s.mar)?,
            None => write!(f, "No face")?,
        }
        if self.alerting {
            write!(f, "  {DROWSINESS_ALERT_TEXT}")?;
        }
        write!(
            f,
            "  Drowsy Events: {}  Yawns: {}",
            self.drowsy_event_count, self.yawn_event_count
        )
    }
}

/// Totals for a finished monitoring session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub frames_without_face: u64,
    /// Frames with a face whose landmarks could not be scored.
    pub frames_skipped: u64,
    pub drowsy_events: u64,
    pub yawn_events: u64,
    pub resets: u64,
    pub mean_ear: Option<f64>,
    pub mean_mar: Option<f64>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames:         {}", self.frames)?;
        writeln!(f, "Without face:   {}", self.frames_without_face)?;
        writeln!(f, "Skipped:        {}", self.frames_skipped)?;
        writeln!(f, "Drowsy events:  {}", self.drowsy_events)?;
        writeln!(f, "Yawns:          {}", self.yawn_events)?;
        writeln!(f, "Resets:         {}", self.resets)?;
        if let (Some(ear), Some(mar)) = (self.mean_ear, self.mean_mar) {
            write!(f, "Mean EAR / MAR: {ear:.3} / {mar:.3}")?;
        }
        Ok(())
    }
}
