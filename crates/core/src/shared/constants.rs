pub const DEFAULT_EAR_THRESHOLD: f64 = 0.25;
pub const DEFAULT_MAR_THRESHOLD: f64 = 0.65;

/// Consecutive frames a condition must hold (~0.7 seconds at 30 fps).
pub const DEFAULT_SUSTAINED_FRAMES: u32 = 20;

pub const MEDIAPIPE_MAPPING_NAME: &str = "mediapipe-face-mesh";
pub const MEDIAPIPE_MAPPING_VERSION: u32 = 1;
pub const MEDIAPIPE_LEFT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];
pub const MEDIAPIPE_RIGHT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
pub const MEDIAPIPE_MOUTH: [usize; 8] = [61, 291, 39, 181, 0, 17, 269, 405];

pub const DROWSINESS_ALERT_TEXT: &str = "DROWSINESS ALERT!";

pub const CONFIG_DIR_NAME: &str = "FatigueGuard";
pub const CONFIG_FILE_NAME: &str = "config.json";
