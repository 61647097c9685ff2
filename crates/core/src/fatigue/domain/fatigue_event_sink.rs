use super::fatigue_event::FatigueEvent;
use super::fatigue_state::ResetScope;

/// Downstream consumer of fatigue events (alert audio, overlay, analytics).
///
/// The detection loop never waits on a sink; implementations that do slow
/// work should hand events off to another thread.
pub trait FatigueEventSink: Send {
    fn on_event(&mut self, event: &FatigueEvent);

    /// Called after the tracked subject was lost and its state reset.
    fn on_reset(&mut self, _scope: ResetScope) {}
}

/// Sink that discards all events.
pub struct NullEventSink;

impl FatigueEventSink for NullEventSink {
    fn on_event(&mut self, _event: &FatigueEvent) {}
}
