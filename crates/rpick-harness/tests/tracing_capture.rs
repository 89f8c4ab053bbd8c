#![forbid(unsafe_code)]
#![cfg(feature = "tracing")]
//! Structured logging emitted by the picker.
//!
//! Run:
//!   cargo test -p rpick-harness --features tracing --test tracing_capture

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rpick_core::geometry::{Point, Rect};
use rpick_harness::fakes::items;
use rpick_harness::{FrameDriver, Recorder};
use rpick_widgets::ReactionPicker;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct Captured {
    spans: Mutex<Vec<CapturedSpan>>,
    events: Mutex<Vec<CapturedEvent>>,
}

struct Capture(Arc<Captured>);

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.0.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.0.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Arc<Captured>) {
    let captured = Arc::new(Captured::default());
    let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&captured)));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured)
}

fn messages(captured: &Captured) -> Vec<String> {
    captured
        .events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| e.fields.get("message").cloned())
        .collect()
}

#[test]
fn layout_span_carries_selection_fields() {
    let (_, captured) = capture(|| {
        let mut picker = ReactionPicker::new(items(4), Recorder::new().services());
        picker.update_layout(360.0, Point::new(40.0, 600.0), 40.0, true);
    });
    let spans = captured.spans.lock().unwrap().clone();
    let layout = spans
        .iter()
        .find(|s| s.name == "rpick.layout")
        .expect("layout span");
    assert_eq!(layout.fields.get("has_selection").map(String::as_str), Some("true"));
    assert_eq!(layout.fields.get("right_aligned").map(String::as_str), Some("false"));
    assert_eq!(layout.fields.get("initial").map(String::as_str), Some("true"));
    assert_eq!(layout.fields.get("highlighted").map(String::as_str), Some("Some(0)"));
    assert!(messages(&captured).iter().any(|m| m == "picker prepared"));
}

#[test]
fn highlight_changes_are_traced() {
    let (_, captured) = capture(|| {
        let mut picker = ReactionPicker::new(items(4), Recorder::new().services());
        let start = Point::new(40.0, 600.0);
        picker.update_layout(360.0, start, 0.0, true);
        picker.update_layout(360.0, start, 1000.0, false);
    });
    let events = captured.events.lock().unwrap().clone();
    let changes: Vec<&CapturedEvent> = events
        .iter()
        .filter(|e| e.fields.get("message").map(String::as_str) == Some("highlight changed"))
        .collect();
    // Four initial assignments, then one off and one on.
    assert_eq!(changes.len(), 6);
    assert!(changes.iter().all(|e| e.level == tracing::Level::TRACE));
}

#[test]
fn exit_lifecycle_is_logged() {
    let (_, captured) = capture(|| {
        let recorder = Recorder::new();
        let mut picker = ReactionPicker::new(items(3), recorder.services());
        picker.update_layout(360.0, Point::new(40.0, 600.0), 40.0, true);
        picker.animate_in();
        picker.animate_out(Some(recorder.target(Rect::new(10.0, 700.0, 20.0, 20.0)).boxed()), true, || {});
        FrameDriver::new(Duration::from_millis(10)).run(&mut picker, Duration::from_millis(400));
    });
    let messages = messages(&captured);
    let order: Vec<&str> = ["entrance started", "exit started", "flight landed", "exit complete"]
        .into_iter()
        .filter(|m| messages.iter().any(|seen| seen == m))
        .collect();
    assert_eq!(order.len(), 4, "missing lifecycle events: {messages:?}");
    let landed = messages.iter().position(|m| m == "flight landed");
    let complete = messages.iter().position(|m| m == "exit complete");
    assert!(landed < complete);
}
