pub mod detecting_landmark_source;
pub mod trace_landmark_source;
