use super::face_mesh::FaceMesh;
use crate::shared::frame::Frame;

/// Domain interface for the external face-mesh model.
///
/// Returns `None` when no face is visible. Only the first face is used;
/// implementations tracking several faces must pick one.
pub trait LandmarkProvider: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Option<FaceMesh>, Box<dyn std::error::Error>>;
}
