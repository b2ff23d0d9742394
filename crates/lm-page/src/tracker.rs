//! Event Tracker
//!
//! Every tracked action becomes a [`TrackedEvent`] pushed to an injected
//! [`EventSink`]. The analytics collector drains the sink; the only contract
//! is the record shape `{ "event": name, ...payload }`.

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Flat payload attached to a tracked event
pub type Payload = Map<String, Value>;

/// Build a payload from string pairs
pub fn payload<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Payload {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// A tracked event; immutable once pushed
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEvent {
    pub name: String,
    pub payload: Payload,
}

impl TrackedEvent {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// The record as the collector sees it
    ///
    /// Payload keys are spread after `event`, so a payload key named `event`
    /// overrides the name.
    pub fn to_record(&self) -> Value {
        let mut record = Map::with_capacity(self.payload.len() + 1);
        record.insert("event".to_string(), Value::String(self.name.clone()));
        for (key, value) in &self.payload {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }

    /// Payload value as a string, if it is one
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

impl Serialize for TrackedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Append-only destination for tracked events
pub trait EventSink {
    fn push(&mut self, event: TrackedEvent);
}

/// Shared in-process event queue (`window.dataLayer`)
///
/// Clones share the same queue, so the host keeps one handle while the page
/// writes through another.
#[derive(Debug, Clone, Default)]
pub struct DataLayer {
    events: Rc<RefCell<Vec<TrackedEvent>>>,
}

impl DataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events pushed so far
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.borrow().clone()
    }

    /// Event names in emission order
    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.name.clone()).collect()
    }

    /// Events with the given name
    pub fn find(&self, name: &str) -> Vec<TrackedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Take all queued events, leaving the queue empty
    pub fn drain(&self) -> Vec<TrackedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventSink for DataLayer {
    fn push(&mut self, event: TrackedEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Writes tracked events to the sink and mirrors them to the debug log
pub struct Tracker {
    sink: Box<dyn EventSink>,
}

impl Tracker {
    pub fn new(sink: impl EventSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// `track(name, payload)`; payload values are pushed unvalidated
    pub fn track(&mut self, name: &str, payload: Payload) {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let rendered = serde_json::to_string(&payload).unwrap_or_default();
            tracing::debug!(event = name, payload = %rendered, "[track] {}", name);
        }
        self.sink.push(TrackedEvent::new(name, payload));
    }

    /// Track an event with an empty payload
    pub fn track_name(&mut self, name: &str) {
        self.track(name, Payload::new());
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker").finish_non_exhaustive()
    }
}
