//! Driver fatigue inference from facial landmarks.
//!
//! Landmarks from an external face-mesh model are mapped to eye and mouth
//! point sets, scored as aspect ratios and fed to a debounced state
//! machine that emits drowsiness alerts and completed yawns.

pub mod detection {
    pub mod domain {
        pub mod face_mesh;
        pub mod landmark_mapping;
        pub mod landmark_provider;
        pub mod landmark_source;
    }
    pub mod infrastructure;
}

pub mod fatigue {
    pub mod domain {
        pub mod fatigue_event;
        pub mod fatigue_event_sink;
        pub mod fatigue_state;
        pub mod fatigue_state_machine;
        pub mod ratio_calculator;
        pub mod thresholds;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod face_loss_policy;
    pub mod fatigue_monitor;
    pub mod frame_report;
    pub mod monitor_config;
    pub mod monitor_fatigue_use_case;
    pub mod session_logger;
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod landmark_point;
}
