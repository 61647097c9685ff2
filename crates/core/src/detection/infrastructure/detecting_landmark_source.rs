use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::detection::domain::landmark_source::{LandmarkObservation, LandmarkSource};
use crate::shared::frame::Frame;

pub type FrameStream = Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + Send>;

/// Runs a `LandmarkProvider` over a stream of captured frames.
///
/// Capture and provider failures are passed through unchanged; a frame the
/// provider finds no face in becomes an observation with `mesh: None`.
pub struct DetectingLandmarkSource {
    frames: FrameStream,
    provider: Box<dyn LandmarkProvider>,
}

impl DetectingLandmarkSource {
    pub fn new(frames: FrameStream, provider: Box<dyn LandmarkProvider>) -> Self {
        Self { frames, provider }
    }
}

impl LandmarkSource for DetectingLandmarkSource {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<LandmarkObservation, Box<dyn std::error::Error>>> + '_>
    {
        let provider = &mut self.provider;
        Box::new(self.frames.by_ref().map(
            move |frame| -> Result<LandmarkObservation, Box<dyn std::error::Error>> {
                let frame = frame?;
                let mesh = provider.detect(&frame)?;
                Ok(LandmarkObservation {
                    frame_index: frame.index(),
                    width: frame.width(),
                    height: frame.height(),
                    mesh,
                })
            },
        ))
    }
}
