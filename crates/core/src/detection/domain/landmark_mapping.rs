//! Provider-specific table from native landmark indices to the semantic
//! eye and mouth slots the ratio formulas expect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::face_mesh::FaceMesh;
use crate::shared::constants::{
    MEDIAPIPE_LEFT_EYE, MEDIAPIPE_MAPPING_NAME, MEDIAPIPE_MAPPING_VERSION, MEDIAPIPE_MOUTH,
    MEDIAPIPE_RIGHT_EYE,
};
use crate::shared::landmark_point::{
    EyePointSet, FacePoints, LandmarkPoint, MouthPointSet, EYE_POINT_COUNT, MOUTH_POINT_COUNT,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("landmark index {index} out of range for a mesh of {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Named, versioned landmark index table.
///
/// Slot order is anatomical: eyes are `[corner, upper, upper, corner,
/// lower, lower]`, the mouth has corners at slots 0 and 4 and the vertical
/// lip pair at slots 1 and 5.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkMapping {
    pub name: String,
    pub version: u32,
    pub left_eye: [usize; EYE_POINT_COUNT],
    pub right_eye: [usize; EYE_POINT_COUNT],
    pub mouth: [usize; MOUTH_POINT_COUNT],
}

impl LandmarkMapping {
    /// Indices into the 468-point MediaPipe face mesh.
    pub fn mediapipe_face_mesh() -> Self {
        Self {
            name: MEDIAPIPE_MAPPING_NAME.to_string(),
            version: MEDIAPIPE_MAPPING_VERSION,
            left_eye: MEDIAPIPE_LEFT_EYE,
            right_eye: MEDIAPIPE_RIGHT_EYE,
            mouth: MEDIAPIPE_MOUTH,
        }
    }

    /// Picks and denormalizes the eye and mouth points of one face.
    pub fn extract(
        &self,
        mesh: &FaceMesh,
        width: u32,
        height: u32,
    ) -> Result<FacePoints, MappingError> {
        Ok(FacePoints {
            left_eye: EyePointSet::new(pick(mesh, &self.left_eye, width, height)?),
            right_eye: EyePointSet::new(pick(mesh, &self.right_eye, width, height)?),
            mouth: MouthPointSet::new(pick(mesh, &self.mouth, width, height)?),
        })
    }
}

impl Default for LandmarkMapping {
    fn default() -> Self {
        Self::mediapipe_face_mesh()
    }
}

fn pick<const N: usize>(
    mesh: &FaceMesh,
    indices: &[usize; N],
    width: u32,
    height: u32,
) -> Result<[LandmarkPoint; N], MappingError> {
    let mut points = [LandmarkPoint::default(); N];
    for (slot, &index) in points.iter_mut().zip(indices) {
        *slot = mesh
            .pixel_point(index, width, height)
            .ok_or(MappingError::IndexOutOfRange {
                index,
                len: mesh.len(),
            })?;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tiny_mapping() -> LandmarkMapping {
        LandmarkMapping {
            name: "test".to_string(),
            version: 3,
            left_eye: [0, 1, 2, 3, 4, 5],
            right_eye: [6, 7, 8, 9, 10, 11],
            mouth: [12, 13, 14, 15, 16, 17, 18, 19],
        }
    }

    fn mesh_of(n: usize) -> FaceMesh {
        FaceMesh::normalized((0..n).map(|i| (i as f64 / 100.0, 0.5)).collect())
    }

    #[test]
    fn test_mediapipe_defaults() {
        let m = LandmarkMapping::default();
        assert_eq!(m.name, "mediapipe-face-mesh");
        assert_eq!(m.version, 1);
        assert_eq!(m.left_eye, [362, 385, 387, 263, 373, 380]);
        assert_eq!(m.right_eye, [33, 160, 158, 133, 153, 144]);
        assert_eq!(m.mouth, [61, 291, 39, 181, 0, 17, 269, 405]);
    }

    #[test]
    fn test_extract_denormalizes_in_slot_order() {
        let face = tiny_mapping().extract(&mesh_of(20), 200, 100).unwrap();
        // Landmark i sits at (i/100 * 200, 0.5 * 100).
        assert_relative_eq!(face.left_eye.points()[3].x, 6.0, epsilon = 1e-9);
        assert_relative_eq!(face.right_eye.points()[0].x, 12.0, epsilon = 1e-9);
        assert_relative_eq!(face.mouth.points()[7].x, 38.0, epsilon = 1e-9);
        assert_relative_eq!(face.mouth.points()[7].y, 50.0);
    }

    #[test]
    fn test_extract_short_mesh_fails() {
        let err = tiny_mapping().extract(&mesh_of(15), 200, 100).unwrap_err();
        assert_eq!(err, MappingError::IndexOutOfRange { index: 15, len: 15 });
    }

    #[test]
    fn test_mediapipe_mapping_needs_full_mesh() {
        let err = LandmarkMapping::default()
            .extract(&mesh_of(100), 640, 480)
            .unwrap_err();
        assert_eq!(err, MappingError::IndexOutOfRange { index: 362, len: 100 });
    }

    #[test]
    fn test_json_roundtrip() {
        let mapping = tiny_mapping();
        let json = serde_json::to_string(&mapping).unwrap();
        let restored: LandmarkMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, mapping);
    }
}
