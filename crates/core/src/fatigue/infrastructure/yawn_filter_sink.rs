use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use crate::fatigue::domain::fatigue_state::ResetScope;

/// Decorator that hides `YawnCompleted` events from the inner sink.
///
/// Yawns are still counted in the fatigue state; this only controls
/// whether they are announced.
pub struct YawnFilterSink {
    inner: Box<dyn FatigueEventSink>,
}

impl YawnFilterSink {
    pub fn new(inner: Box<dyn FatigueEventSink>) -> Self {
        Self { inner }
    }
}

impl FatigueEventSink for YawnFilterSink {
    fn on_event(&mut self, event: &FatigueEvent) {
        if event.is_drowsy_alert() {
            self.inner.on_event(event);
        }
    }

    fn on_reset(&mut self, scope: ResetScope) {
        self.inner.on_reset(scope);
    }
}
