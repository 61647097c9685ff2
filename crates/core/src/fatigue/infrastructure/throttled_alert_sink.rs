use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use crate::fatigue::domain::fatigue_state::ResetScope;

/// Decorator that limits how often drowsy alerts reach the inner sink.
///
/// A `DrowsyAlert` less than `cooldown_frames` frames after the last one
/// delivered is swallowed. Yawn events always pass through. A cooldown of
/// zero disables throttling. A reset starts a fresh cooldown window, since
/// frame indices may restart after one.
pub struct ThrottledAlertSink {
    inner: Box<dyn FatigueEventSink>,
    cooldown_frames: u64,
    last_alert_frame: Option<u64>,
    suppressed: usize,
}

impl ThrottledAlertSink {
    pub fn new(inner: Box<dyn FatigueEventSink>, cooldown_frames: u64) -> Self {
        Self {
            inner,
            cooldown_frames,
            last_alert_frame: None,
            suppressed: 0,
        }
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    fn in_cooldown(&self, frame_index: u64) -> bool {
        self.last_alert_frame
            .is_some_and(|last| frame_index.saturating_sub(last) < self.cooldown_frames)
    }
}

impl FatigueEventSink for ThrottledAlertSink {
    fn on_event(&mut self, event: &FatigueEvent) {
        if let FatigueEvent::DrowsyAlert { frame_index, .. } = *event {
            if self.in_cooldown(frame_index) {
                self.suppressed += 1;
                log::debug!("Suppressing drowsy alert at frame {frame_index} (cooldown)");
                return;
            }
            self.last_alert_frame = Some(frame_index);
        }
        self.inner.on_event(event);
    }

    fn on_reset(&mut self, scope: ResetScope) {
        self.last_alert_frame = None;
        self.inner.on_reset(scope);
    }
}
