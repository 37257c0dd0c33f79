//! Product analytics for exports.
//!
//! Every export reports one event to an [AnalyticsSink]. Delivery is fire and
//! forget: [emit] logs a failing sink and carries on, so analytics can never
//! fail an export.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GUEST_GUIDE_EXPORTED: &str = "guest_guide_pdf_exported";
pub const PDF_EXPORTED: &str = "pdf_exported";
pub const QR_CODE_DOWNLOADED: &str = "qr_code_downloaded";

/// A named event with free-form JSON properties
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "event")]
    pub name: String,
    pub properties: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new<S: ToString>(name: S) -> AnalyticsEvent {
        AnalyticsEvent {
            name: name.to_string(),
            properties: Map::new(),
        }
    }

    pub fn with<K: ToString, V: Into<Value>>(mut self, key: K, value: V) -> AnalyticsEvent {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn guest_guide_exported(property_name: &str) -> AnalyticsEvent {
        AnalyticsEvent::new(GUEST_GUIDE_EXPORTED).with("property_name", property_name)
    }

    pub fn pdf_exported(filename: &str) -> AnalyticsEvent {
        AnalyticsEvent::new(PDF_EXPORTED).with("filename", filename)
    }

    pub fn qr_code_downloaded(value: &str) -> AnalyticsEvent {
        AnalyticsEvent::new(QR_CODE_DOWNLOADED).with("value", value)
    }
}

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Somewhere to send analytics events
pub trait AnalyticsSink {
    fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for &T {
    fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        (**self).capture(event)
    }
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for Box<T> {
    fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        (**self).capture(event)
    }
}

/// Sends `event` to `sink`, logging rather than returning any failure
pub fn emit<A: AnalyticsSink + ?Sized>(sink: &A, event: &AnalyticsEvent) {
    if let Err(e) = sink.capture(event) {
        log::warn!("dropping analytics event {}: {e}", event.name);
    }
}

/// Drops every event
#[derive(Debug, Default, Copy, Clone)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn capture(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Writes events to the `log` facade at info level
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        log::info!(
            "analytics: {} {}",
            event.name,
            Value::Object(event.properties.clone())
        );
        Ok(())
    }
}

/// Appends events to a file, one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonLinesSink {
        JsonLinesSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalyticsSink for JsonLinesSink {
    fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl AnalyticsSink for Unreachable {
        fn capture(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn events_serialize_with_their_properties() {
        let event = AnalyticsEvent::guest_guide_exported("Haus am See");
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"guest_guide_pdf_exported","properties":{"property_name":"Haus am See"}}"#
        );
    }

    #[test]
    fn failing_sinks_are_swallowed() {
        emit(&Unreachable, &AnalyticsEvent::pdf_exported("view.pdf"));
    }

    #[test]
    fn json_lines_append() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonLinesSink::new(dir.path().join("events.jsonl"));
        sink.capture(&AnalyticsEvent::qr_code_downloaded("https://example.com/property/1"))
            .unwrap();
        sink.capture(&AnalyticsEvent::pdf_exported("view.pdf")).unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "qr_code_downloaded");
        assert_eq!(first["properties"]["value"], "https://example.com/property/1");
    }
}
