//! Eye and mouth aspect ratios from pixel-space landmark sets.
//!
//! EAR follows Soukupová & Čech: the two vertical eyelid spans over twice the
//! horizontal corner span. MAR uses a single vertical lip span over the
//! mouth-corner span. Both are scale-invariant, so the thresholds hold
//! regardless of how far the face is from the camera.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::landmark_point::{EyePointSet, FacePoints, MouthPointSet};

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    #[error("degenerate {0} geometry: reference span has zero length")]
    DegenerateGeometry(&'static str),
    #[error("{0} ratio is not a finite number")]
    NonFinite(&'static str),
}

/// One frame's worth of ratios, consumed immediately by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioSample {
    pub avg_ear: f64,
    pub mar: f64,
    pub frame_index: u64,
}

impl RatioSample {
    pub fn new(avg_ear: f64, mar: f64, frame_index: u64) -> Self {
        Self {
            avg_ear,
            mar,
            frame_index,
        }
    }

    /// Scores both eyes and the mouth of one face.
    pub fn from_face(points: &FacePoints, frame_index: u64) -> Result<Self, RatioError> {
        let left = eye_aspect_ratio(&points.left_eye)?;
        let right = eye_aspect_ratio(&points.right_eye)?;
        let mar = mouth_aspect_ratio(&points.mouth)?;
        Ok(Self {
            avg_ear: average(left, right)?,
            mar,
            frame_index,
        })
    }
}

pub fn eye_aspect_ratio(eye: &EyePointSet) -> Result<f64, RatioError> {
    let p = eye.points();
    let horizontal = p[0].distance(&p[3]);
    if horizontal == 0.0 {
        return Err(RatioError::DegenerateGeometry("eye"));
    }
    let vertical = p[1].distance(&p[5]) + p[2].distance(&p[4]);
    finite(vertical / (2.0 * horizontal), "eye")
}

pub fn mouth_aspect_ratio(mouth: &MouthPointSet) -> Result<f64, RatioError> {
    let p = mouth.points();
    let horizontal = p[0].distance(&p[4]);
    if horizontal == 0.0 {
        return Err(RatioError::DegenerateGeometry("mouth"));
    }
    finite(p[1].distance(&p[5]) / horizontal, "mouth")
}

pub fn average(left_ear: f64, right_ear: f64) -> Result<f64, RatioError> {
    if !left_ear.is_finite() || !right_ear.is_finite() {
        return Err(RatioError::NonFinite("average eye"));
    }
    Ok((left_ear + right_ear) / 2.0)
}

fn finite(value: f64, what: &'static str) -> Result<f64, RatioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatioError::NonFinite(what))
    }
}
