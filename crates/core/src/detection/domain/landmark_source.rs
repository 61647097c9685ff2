use serde::{Deserialize, Serialize};

use super::face_mesh::FaceMesh;

/// What the landmark provider saw in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkObservation {
    pub frame_index: u64,
    pub width: u32,
    pub height: u32,
    /// `None` when no face was detected.
    #[serde(default)]
    pub mesh: Option<FaceMesh>,
}

/// Stream of per-frame landmark observations in frame order.
pub trait LandmarkSource: Send {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<LandmarkObservation, Box<dyn std::error::Error>>> + '_>;
}
