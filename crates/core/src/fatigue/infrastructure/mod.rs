pub mod channel_event_sink;
pub mod logging_event_sink;
pub mod sink_factory;
pub mod throttled_alert_sink;
pub mod yawn_filter_sink;
