use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::constants::DROWSINESS_ALERT_TEXT;

/// One-shot signal produced by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FatigueEvent {
    /// Eyes have stayed closed for the sustained-frame count. Fires once
    /// per closure episode, on the frame the count is reached.
    DrowsyAlert { frame_index: u64, closed_frames: u32 },
    /// A sufficiently long mouth opening just ended.
    YawnCompleted {
        frame_index: u64,
        duration_frames: u32,
    },
}

impl FatigueEvent {
    pub fn frame_index(&self) -> u64 {
        match self {
            FatigueEvent::DrowsyAlert { frame_index, .. }
            | FatigueEvent::YawnCompleted { frame_index, .. } => *frame_index,
        }
    }

    pub fn is_drowsy_alert(&self) -> bool {
        matches!(self, FatigueEvent::DrowsyAlert { .. })
    }
}

impl fmt::Display for FatigueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatigueEvent::DrowsyAlert {
                frame_index,
                closed_frames,
            } => write!(
                f,
                "{DROWSINESS_ALERT_TEXT} (frame {frame_index}, eyes closed for {closed_frames} frames)"
            ),
            FatigueEvent::YawnCompleted {
                frame_index,
                duration_frames,
            } => write!(
                f,
                "Yawn completed (frame {frame_index}, lasted {duration_frames} frames)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_index() {
        let drowsy = FatigueEvent::DrowsyAlert {
            frame_index: 12,
            closed_frames: 20,
        };
        let yawn = FatigueEvent::YawnCompleted {
            frame_index: 40,
            duration_frames: 25,
        };
        assert_eq!(drowsy.frame_index(), 12);
        assert_eq!(yawn.frame_index(), 40);
        assert!(drowsy.is_drowsy_alert());
        assert!(!yawn.is_drowsy_alert());
    }

    #[test]
    fn test_display_contains_alert_text() {
        let event = FatigueEvent::DrowsyAlert {
            frame_index: 3,
            closed_frames: 20,
        };
        assert!(event.to_string().starts_with("DROWSINESS ALERT!"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let event = FatigueEvent::YawnCompleted {
            frame_index: 9,
            duration_frames: 21,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"yawn_completed","frame_index":9,"duration_frames":21}"#
        );
    }
}
