//! DOM Events
//!
//! Event types delivered to page behaviors and the event object handed to
//! listeners during dispatch.

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    Focus,
    Blur,
    Submit,
    /// `<details>` open state changed
    Toggle,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur | EventType::Toggle)
    }

    /// Check if listeners may cancel the default action
    pub fn cancelable(&self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown | EventType::Submit)
    }

    /// DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::KeyDown => "keydown",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Submit => "submit",
            EventType::Toggle => "toggle",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    /// `KeyboardEvent.key` for keydown events
    pub key: Option<String>,
    default_prevented: bool,
}

impl DomEvent {
    /// Create an event aimed at `target`
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            key: None,
            default_prevented: false,
        }
    }

    /// Create a keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    pub fn bubbles(&self) -> bool {
        self.event_type.bubbles()
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.event_type.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check the keydown key
    pub fn is_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubbling_rules() {
        assert!(EventType::Click.bubbles());
        assert!(EventType::Submit.bubbles());
        assert!(EventType::KeyDown.bubbles());
        assert!(!EventType::Focus.bubbles());
        assert!(!EventType::Toggle.bubbles());
    }

    #[test]
    fn test_event_names() {
        let names: Vec<_> = [
            EventType::Click,
            EventType::KeyDown,
            EventType::Focus,
            EventType::Blur,
            EventType::Submit,
            EventType::Toggle,
        ]
        .iter()
        .map(EventType::as_str)
        .collect();
        assert_eq!(names, ["click", "keydown", "focus", "blur", "submit", "toggle"]);
    }

    #[test]
    fn test_prevent_default_only_when_cancelable() {
        let mut submit = DomEvent::new(EventType::Submit, NodeId(3));
        submit.prevent_default();
        assert!(submit.is_default_prevented());

        let mut focus = DomEvent::new(EventType::Focus, NodeId(3));
        focus.prevent_default();
        assert!(!focus.is_default_prevented());
    }

    #[test]
    fn test_key_down() {
        let event = DomEvent::key_down(NodeId(1), "Escape");
        assert_eq!(event.event_type, EventType::KeyDown);
        assert!(event.is_key("Escape"));
        assert!(!event.is_key("Enter"));
    }
}
