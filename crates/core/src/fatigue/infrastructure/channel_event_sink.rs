use crossbeam_channel::Sender;

use crate::fatigue::domain::fatigue_event::FatigueEvent;
use crate::fatigue::domain::fatigue_event_sink::FatigueEventSink;

/// Queues events for a consumer on another thread (e.g. alert playback).
///
/// Sending never blocks on a bounded channel: when the queue is full or the
/// receiver is gone the event is dropped, so a stalled consumer cannot hold
/// up frame processing.
pub struct ChannelEventSink {
    tx: Sender<FatigueEvent>,
    dropped: usize,
}

impl ChannelEventSink {
    pub fn new(tx: Sender<FatigueEvent>) -> Self {
        Self { tx, dropped: 0 }
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl FatigueEventSink for ChannelEventSink {
    fn on_event(&mut self, event: &FatigueEvent) {
        if let Err(e) = self.tx.try_send(*event) {
            self.dropped += 1;
            log::debug!("Event consumer unavailable, dropping event: {e}");
        }
    }
}
