//! Event sink trait and implementations.

use parking_lot::RwLock;
use tracing::{debug, info, Level};

use super::PipelineEvent;

/// Receiver for pipeline progress events.
///
/// Sinks never fail towards the pipeline.
pub trait EventSink: Send + Sync {
    /// Records an event without blocking.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The type of event (e.g., "niche.searched")
    /// * `data` - Optional event data
    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>);

    /// Records a typed pipeline event.
    fn record(&self, event: &PipelineEvent) {
        self.try_emit(event.event_type(), Some(event.data()));
    }
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn try_emit(&self, _event_type: &str, _data: Option<serde_json::Value>) {}
}

/// A sink that logs events through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl LoggingEventSink {
    /// Creates a logging sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl EventSink for LoggingEventSink {
    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        let data = data.unwrap_or(serde_json::Value::Null);
        if self.level == Level::DEBUG || self.level == Level::TRACE {
            debug!(event_type, %data, "event");
        } else {
            info!(event_type, %data, "event");
        }
    }
}

/// A sink that keeps every event, for tests and reports.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<(String, Option<serde_json::Value>)>>,
}

impl CollectingEventSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<(String, Option<serde_json::Value>)> {
        self.events.read().clone()
    }

    /// Returns the collected event types in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|(t, _)| t.clone()).collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl EventSink for CollectingEventSink {
    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.events.write().push((event_type.to_string(), data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::root_domain;

    #[test]
    fn test_noop_sink() {
        let sink = NoOpEventSink;
        sink.try_emit("run.started", Some(serde_json::json!({"x": 1})));
        sink.record(&PipelineEvent::RunCompleted { records: 0, skipped_prior: 0 });
    }

    #[test]
    fn test_logging_sink() {
        let sink = LoggingEventSink::debug();
        sink.try_emit("niche.searched", Some(serde_json::json!({"niche": "camping"})));
        sink.record(&PipelineEvent::RunCompleted { records: 0, skipped_prior: 0 });
        LoggingEventSink::new(Level::INFO).try_emit("run.started", None);
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.try_emit("run.started", None);
        sink.record(&PipelineEvent::CandidateSkipped {
            niche: "camping".into(),
            root_domain: root_domain("tents.lv"),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.event_types(), vec!["run.started", "candidate.skipped_prior"]);
        let (_, data) = &sink.events()[1];
        assert_eq!(data.as_ref().unwrap()["root_domain"], "tents.lv");
    }

    #[test]
    fn test_sink_usable_as_trait_object() {
        let sink: std::sync::Arc<dyn EventSink> = std::sync::Arc::new(CollectingEventSink::new());
        sink.record(&PipelineEvent::RunCompleted { records: 3, skipped_prior: 1 });
        sink.try_emit("niche.searched", None);
    }
}
