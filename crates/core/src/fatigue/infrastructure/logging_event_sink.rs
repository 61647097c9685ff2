use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use crate::fatigue::domain::fatigue_state::ResetScope;

/// Writes events through the `log` facade.
///
/// Drowsy alerts go out at `warn` so they stay visible under the default
/// `RUST_LOG=info` filter even when per-frame output is throttled.
pub struct LoggingEventSink {
    logged: usize,
}

impl LoggingEventSink {
    pub fn new() -> Self {
        Self { logged: 0 }
    }

    pub fn logged(&self) -> usize {
        self.logged
    }
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FatigueEventSink for LoggingEventSink {
    fn on_event(&mut self, event: &FatigueEvent) {
        self.logged += 1;
        match event {
            FatigueEvent::DrowsyAlert { .. } => log::warn!("{event}"),
            FatigueEvent::YawnCompleted { .. } => log::info!("{event}"),
        }
    }

    fn on_reset(&mut self, scope: ResetScope) {
        log::info!("Face lost, fatigue state reset ({scope:?})");
    }
}
