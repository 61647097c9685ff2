use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EYE_POINT_COUNT: usize = 6;
pub const MOUTH_POINT_COUNT: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} point set needs exactly {expected} points, got {actual}")]
pub struct PointCountError {
    pub kind: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// A facial landmark in frame pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &LandmarkPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for LandmarkPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Six points outlining one eye.
///
/// p0 and p3 are the horizontal corners; (p1, p5) and (p2, p4) are the
/// vertical pairs. Order is anatomical and must not be shuffled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyePointSet([LandmarkPoint; EYE_POINT_COUNT]);

impl EyePointSet {
    pub const fn new(points: [LandmarkPoint; EYE_POINT_COUNT]) -> Self {
        Self(points)
    }

    pub fn from_slice(points: &[LandmarkPoint]) -> Result<Self, PointCountError> {
        <[LandmarkPoint; EYE_POINT_COUNT]>::try_from(points)
            .map(Self)
            .map_err(|_| PointCountError {
                kind: "eye",
                expected: EYE_POINT_COUNT,
                actual: points.len(),
            })
    }

    pub fn points(&self) -> &[LandmarkPoint; EYE_POINT_COUNT] {
        &self.0
    }
}

/// Eight points around the mouth.
///
/// (p1, p5) is the vertical pair and (p0, p4) the horizontal pair; the
/// remaining points only matter for drawing the outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthPointSet([LandmarkPoint; MOUTH_POINT_COUNT]);

impl MouthPointSet {
    pub const fn new(points: [LandmarkPoint; MOUTH_POINT_COUNT]) -> Self {
        Self(points)
    }

    pub fn from_slice(points: &[LandmarkPoint]) -> Result<Self, PointCountError> {
        <[LandmarkPoint; MOUTH_POINT_COUNT]>::try_from(points)
            .map(Self)
            .map_err(|_| PointCountError {
                kind: "mouth",
                expected: MOUTH_POINT_COUNT,
                actual: points.len(),
            })
    }

    pub fn points(&self) -> &[LandmarkPoint; MOUTH_POINT_COUNT] {
        &self.0
    }
}

/// The three point sets the ratio formulas need from one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePoints {
    pub left_eye: EyePointSet,
    pub right_eye: EyePointSet,
    pub mouth: MouthPointSet,
}
