use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_EAR_THRESHOLD, DEFAULT_MAR_THRESHOLD, DEFAULT_SUSTAINED_FRAMES,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
    #[error("sustained_frames must be at least 1")]
    ZeroSustainedFrames,
}

/// Decision thresholds, fixed for the lifetime of a session.
///
/// Tuned empirically for a webcam at arm's length; they are not derived
/// from anatomy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Eyes count as closed while the averaged EAR is strictly below this.
    pub ear_threshold: f64,
    /// The mouth counts as yawning while MAR is strictly above this.
    pub mar_threshold: f64,
    /// Consecutive frames before a closure alerts or a yawn qualifies.
    pub sustained_frames: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
            mar_threshold: DEFAULT_MAR_THRESHOLD,
            sustained_frames: DEFAULT_SUSTAINED_FRAMES,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        check_ratio("ear_threshold", self.ear_threshold)?;
        check_ratio("mar_threshold", self.mar_threshold)?;
        if self.sustained_frames == 0 {
            return Err(ThresholdError::ZeroSustainedFrames);
        }
        Ok(())
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ThresholdError::InvalidRatio { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let t = Thresholds::default();
        assert_eq!(t.ear_threshold, 0.25);
        assert_eq!(t.mar_threshold, 0.65);
        assert_eq!(t.sustained_frames, 20);
        assert!(t.validate().is_ok());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_ear_threshold(#[case] value: f64) {
        let t = Thresholds {
            ear_threshold: value,
            ..Thresholds::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ThresholdError::InvalidRatio {
                name: "ear_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_mar_threshold() {
        let t = Thresholds {
            mar_threshold: 0.0,
            ..Thresholds::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ThresholdError::InvalidRatio {
                name: "mar_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_sustained_frames_rejected() {
        let t = Thresholds {
            sustained_frames: 0,
            ..Thresholds::default()
        };
        assert_eq!(t.validate(), Err(ThresholdError::ZeroSustainedFrames));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let t: Thresholds = serde_json::from_str(r#"{"sustained_frames": 15}"#).unwrap();
        assert_eq!(t.sustained_frames, 15);
        assert_eq!(t.ear_threshold, 0.25);
        assert_eq!(t.mar_threshold, 0.65);
    }
}
