use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::landmark_source::LandmarkSource;
use crate::pipeline::fatigue_monitor::FatigueMonitor;
use crate::pipeline::frame_report::{FrameReport, SessionSummary};
use crate::pipeline::session_logger::SessionLogger;

pub type FrameCallback = Box<dyn FnMut(&FrameReport) + Send>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("frame {frame_index} arrived after frame {previous}; frame indices must increase")]
    FrameOutOfOrder { frame_index: u64, previous: u64 },
}

/// Drains a landmark source through a `FatigueMonitor`.
///
/// Single-use: `execute` consumes the source, so calling it twice fails.
/// A source whose frame indices do not strictly increase ends the session
/// with `SessionError::FrameOutOfOrder`.
/// There is no cancellation; a live caller stops by ending its source.
pub struct MonitorFatigueUseCase {
    source: Option<Box<dyn LandmarkSource>>,
    monitor: FatigueMonitor,
    logger: Box<dyn SessionLogger>,
    on_frame: Option<FrameCallback>,
}

impl MonitorFatigueUseCase {
    pub fn new(
        source: Box<dyn LandmarkSource>,
        monitor: FatigueMonitor,
        logger: Box<dyn SessionLogger>,
        on_frame: Option<FrameCallback>,
    ) -> Self {
        Self {
            source: Some(source),
            monitor,
            logger,
            on_frame,
        }
    }

    pub fn execute(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut source = self
            .source
            .take()
            .ok_or("Monitoring session already executed")?;

        let mut frames = 0u64;
        let mut last_frame: Option<u64> = None;
        for observation in source.observations() {
            let observation = observation?;
            if let Some(previous) = last_frame {
                if observation.frame_index <= previous {
                    return Err(SessionError::FrameOutOfOrder {
                        frame_index: observation.frame_index,
                        previous,
                    }
                    .into());
                }
            }
            last_frame = Some(observation.frame_index);

            let started = Instant::now();
            let report = self.monitor.process(&observation);
            self.logger
                .timing("process", started.elapsed().as_secs_f64() * 1000.0);

            if let Some(sample) = &report.sample {
                self.logger.metric("ear", sample.avg_ear);
                self.logger.metric("mar", sample.mar);
            }
            if let Some(callback) = self.on_frame.as_mut() {
                callback(&report);
            }

            frames += 1;
            self.logger.progress(frames);
        }

        let summary = self.monitor.summary();
        self.logger.info(&format!(
            "Session finished: {} drowsy alerts, {} yawns over {} frames",
            summary.drowsy_events, summary.yawn_events, summary.frames
        ));
        self.logger.summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_mesh::FaceMesh;
    use crate::detection::domain::landmark_mapping::LandmarkMapping;
    use crate::detection::domain::landmark_source::LandmarkObservation;
    use crate::fatigue::domain::fatigue_event_sink::NullEventSink;
    use crate::fatigue::domain::fatigue_state_machine::FatigueStateMachine;
    use crate::fatigue::domain::thresholds::Thresholds;
    use crate::pipeline::face_loss_policy::FaceLossPolicy;
    use crate::detection::infrastructure::trace_landmark_source::TraceLandmarkSource;
    use crate::pipeline::session_logger::NullSessionLogger;
    use rstest::rstest;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    struct StubSource {
        observations: Vec<Result<LandmarkObservation, String>>,
    }

    impl LandmarkSource for StubSource {
        fn observations(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<LandmarkObservation, Box<dyn std::error::Error>>> + '_>
        {
            Box::new(self.observations.drain(..).map(|o| o.map_err(Into::into)))
        }
    }

    struct CountingLogger {
        metrics: Arc<Mutex<Vec<(String, f64)>>>,
        frames: Arc<Mutex<u64>>,
    }

    impl SessionLogger for CountingLogger {
        fn progress(&mut self, frames: u64) {
            *self.frames.lock().unwrap() = frames;
        }
        fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
        fn metric(&mut self, name: &str, value: f64) {
            self.metrics.lock().unwrap().push((name.to_string(), value));
        }
        fn info(&mut self, _message: &str) {}
    }

    /// MediaPipe-sized mesh (468 points) whose eyes close when `closed`.
    fn mediapipe_mesh(closed: bool) -> FaceMesh {
        let mapping = LandmarkMapping::mediapipe_face_mesh();
        let mut points = vec![(0.0, 0.0); 468];
        let open = if closed { 0.004 } else { 0.012 };
        for eye in [mapping.left_eye, mapping.right_eye] {
            points[eye[0]] = (0.40, 0.40);
            points[eye[1]] = (0.41, 0.40 - open);
            points[eye[2]] = (0.43, 0.40 - open);
            points[eye[3]] = (0.44, 0.40);
            points[eye[4]] = (0.43, 0.40 + open);
            points[eye[5]] = (0.41, 0.40 + open);
        }
        let m = mapping.mouth;
        points[m[0]] = (0.45, 0.70);
        points[m[1]] = (0.50, 0.69);
        points[m[4]] = (0.55, 0.70);
        points[m[5]] = (0.50, 0.71);
        FaceMesh::normalized(points)
    }

    fn observation(frame_index: u64, mesh: Option<FaceMesh>) -> LandmarkObservation {
        LandmarkObservation {
            frame_index,
            width: 640,
            height: 480,
            mesh,
        }
    }

    fn monitor(sustained_frames: u32) -> FatigueMonitor {
        FatigueMonitor::new(
            LandmarkMapping::mediapipe_face_mesh(),
            FatigueStateMachine::new(Thresholds {
                sustained_frames,
                ..Thresholds::default()
            })
            .unwrap(),
            vec![Box::new(NullEventSink)],
            FaceLossPolicy::default(),
        )
    }

    #[test]
    fn test_execute_detects_drowsiness_from_mediapipe_mesh() {
        let observations = (0..5)
            .map(|i| Ok(observation(i, Some(mediapipe_mesh(true)))))
            .collect();
        let reports = Arc::new(Mutex::new(Vec::new()));
        let reports_clone = reports.clone();
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource { observations }),
            monitor(5),
            Box::new(NullSessionLogger),
            Some(Box::new(move |r: &FrameReport| {
                reports_clone.lock().unwrap().push(r.clone())
            })),
        );

        let summary = use_case.execute().unwrap();

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.drowsy_events, 1);
        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 5);
        assert!(reports[4].alerting);
        let ear = reports[0].sample.unwrap().avg_ear;
        assert!(ear < 0.25, "closed-eye EAR was {ear}");
    }

    #[test]
    fn test_open_eyes_stay_quiet() {
        let observations = (0..30)
            .map(|i| Ok(observation(i, Some(mediapipe_mesh(false)))))
            .collect();
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource { observations }),
            monitor(5),
            Box::new(NullSessionLogger),
            None,
        );
        let summary = use_case.execute().unwrap();
        assert_eq!(summary.drowsy_events, 0);
        assert!(summary.mean_ear.unwrap() > 0.25);
    }

    #[test]
    fn test_logger_receives_metrics_and_progress() {
        let metrics = Arc::new(Mutex::new(Vec::new()));
        let frames = Arc::new(Mutex::new(0));
        let observations = vec![
            Ok(observation(0, Some(mediapipe_mesh(false)))),
            Ok(observation(1, None)),
        ];
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource { observations }),
            monitor(5),
            Box::new(CountingLogger {
                metrics: metrics.clone(),
                frames: frames.clone(),
            }),
            None,
        );
        use_case.execute().unwrap();

        let metrics = metrics.lock().unwrap();
        let names: Vec<&str> = metrics.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["ear", "mar"]);
        assert_eq!(*frames.lock().unwrap(), 2);
    }

    #[test]
    fn test_source_error_stops_session() {
        let observations = vec![
            Ok(observation(0, None)),
            Err("failed to grab frame".to_string()),
            Ok(observation(2, None)),
        ];
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource { observations }),
            monitor(5),
            Box::new(NullSessionLogger),
            None,
        );
        let err = use_case.execute().unwrap_err();
        assert_eq!(err.to_string(), "failed to grab frame");
    }

    #[test]
    fn test_execute_twice_fails() {
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource {
                observations: Vec::new(),
            }),
            monitor(5),
            Box::new(NullSessionLogger),
            None,
        );
        assert!(use_case.execute().is_ok());
        assert!(use_case.execute().is_err());
    }

    #[rstest]
    #[case::backwards(5, 3)]
    #[case::repeated(4, 4)]
    fn test_out_of_order_trace_ends_session_with_error(#[case] first: u64, #[case] second: u64) {
        let trace = format!(
            "{{\"frame_index\":{first},\"width\":640,\"height\":480,\"mesh\":null}}\n\
             {{\"frame_index\":{second},\"width\":640,\"height\":480,\"mesh\":null}}\n"
        );
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(TraceLandmarkSource::from_reader(Cursor::new(trace))),
            monitor(5),
            Box::new(NullSessionLogger),
            None,
        );

        let err = use_case.execute().unwrap_err();

        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::FrameOutOfOrder {
                frame_index: second,
                previous: first,
            })
        );
    }

    #[test]
    fn test_gaps_in_frame_indices_are_accepted() {
        let observations = [0, 2, 7]
            .into_iter()
            .map(|i| Ok(observation(i, None)))
            .collect();
        let mut use_case = MonitorFatigueUseCase::new(
            Box::new(StubSource { observations }),
            monitor(5),
            Box::new(NullSessionLogger),
            None,
        );
        assert_eq!(use_case.execute().unwrap().frames, 3);
    }
}
