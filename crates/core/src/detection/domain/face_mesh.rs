use serde::{Deserialize, Serialize};

use crate::shared::landmark_point::LandmarkPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// x and y in [0, 1], relative to frame width and height.
    #[default]
    Normalized,
    Pixel,
}

/// Every landmark the provider produced for one face, in provider order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceMesh {
    #[serde(default)]
    space: CoordinateSpace,
    points: Vec<(f64, f64)>,
}

impl FaceMesh {
    pub fn new(points: Vec<(f64, f64)>, space: CoordinateSpace) -> Self {
        Self { space, points }
    }

    pub fn normalized(points: Vec<(f64, f64)>) -> Self {
        Self::new(points, CoordinateSpace::Normalized)
    }

    pub fn pixel(points: Vec<(f64, f64)>) -> Self {
        Self::new(points, CoordinateSpace::Pixel)
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark `index` in pixel space, or `None` if the mesh is too short.
    pub fn pixel_point(&self, index: usize, width: u32, height: u32) -> Option<LandmarkPoint> {
        let (x, y) = *self.points.get(index)?;
        Some(match self.space {
            CoordinateSpace::Normalized => {
                LandmarkPoint::new(x * f64::from(width), y * f64::from(height))
            }
            CoordinateSpace::Pixel => LandmarkPoint::new(x, y),
        })
    }
}
