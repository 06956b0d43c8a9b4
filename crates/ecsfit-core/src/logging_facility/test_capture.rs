//! In-memory event recorder for asserting on structured log output
//!
//! All tests in a process share one recorder, so assertions should filter on
//! an op name or field value unique to the test.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, keyed by field name
#[derive(Clone, Debug, Default)]
pub struct CapturedEvent {
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl Visit for CapturedEvent {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct RecordingLayer {
    log: EventLog,
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = CapturedEvent::default();
        event.record(&mut captured);
        captured.op = captured.fields.get("op").cloned();
        captured.event = captured.fields.get("event").cloned();

        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Read handle over the shared event log
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn has_event(&self, op: &str, event: &str) -> bool {
        self.count_events(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event)) > 0
    }

    /// Count `op`/`event` records whose `field` equals `value`
    pub fn count_matching(&self, op: &str, event: &str, field: &str, value: &str) -> usize {
        self.count_events(|e| {
            e.op.as_deref() == Some(op)
                && e.event.as_deref() == Some(event)
                && e.fields.get(field).map(String::as_str) == Some(value)
        })
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the recorder as the global subscriber on first call and return a
/// handle to it.
///
/// ```
/// use ecsfit_core::logging_facility::test_capture::init_test_capture;
/// use ecsfit_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("read_fields");
/// assert!(capture.has_event("read_fields", "start"));
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            tracing_subscriber::registry()
                .with(RecordingLayer { log: log.clone() })
                .init();
            TestCapture { log }
        })
        .clone()
}
