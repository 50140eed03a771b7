//! Fire-and-forget analytics events.
//!
//! There is no analytics backend. [`ConsoleSink`] prints events to the
//! browser console and [`RecordingSink`] keeps them for inspection.

use std::cell::RefCell;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

pub type Properties = Map<String, Value>;

pub trait TrackingSink {
    fn emit(&self, event: &str, properties: Properties);
}

/// Writes every event to the browser console as a structured object.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl TrackingSink for ConsoleSink {
    fn emit(&self, event: &str, properties: Properties) {
        log::debug!("tracking {} {}", event, Value::Object(properties.clone()));
        match serde_wasm_bindgen::to_value(&properties) {
            Ok(value) => gloo_console::log!(format!("📊 Event tracked: {}", event), value),
            Err(_) => gloo_console::log!(format!("📊 Event tracked: {}", event)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEvent {
    pub name: String,
    pub properties: Properties,
}

impl TrackedEvent {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<TrackedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.borrow().clone()
    }

    pub fn named(&self, name: &str) -> Vec<TrackedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl TrackingSink for RecordingSink {
    fn emit(&self, event: &str, properties: Properties) {
        self.events.borrow_mut().push(TrackedEvent {
            name: event.to_string(),
            properties,
        });
    }
}

pub const SECTION_VIEW: &str = "section_view";
pub const BUTTON_CLICK: &str = "button_click";
pub const JAVASCRIPT_ERROR: &str = "javascript_error";
pub const OFFER_CLAIMED: &str = "offer_claimed";
pub const DEMO_REQUESTED: &str = "demo_requested";
pub const LOGIN_ATTEMPT: &str = "login_attempt";
pub const SIGNUP_ATTEMPT: &str = "signup_attempt";

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn stamped(pairs: Vec<(&str, Value)>) -> Properties {
    let mut properties: Properties = pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    properties.insert("timestamp".to_string(), Value::String(timestamp()));
    properties
}

pub fn section_view(section: &str) -> Properties {
    stamped(vec![("section", section.into())])
}

pub fn button_click(button_text: &str, section: Option<&str>) -> Properties {
    stamped(vec![
        ("button_text", button_text.trim().into()),
        ("section", section.unwrap_or("unknown").into()),
    ])
}

pub fn javascript_error(message: Option<&str>, filename: &str, lineno: u32) -> Properties {
    stamped(vec![
        ("message", message.unwrap_or("Unknown error").into()),
        ("filename", filename.into()),
        ("lineno", lineno.into()),
    ])
}

pub fn login_attempt(email: &str) -> Properties {
    stamped(vec![("email", email.into())])
}

pub fn signup_attempt(name: &str, email: &str) -> Properties {
    stamped(vec![("name", name.into()), ("email", email.into())])
}

pub fn bare() -> Properties {
    stamped(Vec::new())
}
