use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use crate::fatigue::infrastructure::throttled_alert_sink::ThrottledAlertSink;
use crate::fatigue::infrastructure::yawn_filter_sink::YawnFilterSink;

/// Wraps `inner` with the delivery policy decorators that are enabled.
pub fn apply_delivery_policy(
    inner: Box<dyn FatigueEventSink>,
    alert_cooldown_frames: u64,
    report_yawns: bool,
) -> Box<dyn FatigueEventSink> {
    let mut sink = inner;
    if !report_yawns {
        sink = Box::new(YawnFilterSink::new(sink));
    }
    if alert_cooldown_frames > 0 {
        sink = Box::new(ThrottledAlertSink::new(sink, alert_cooldown_frames));
    }
    sink
}
