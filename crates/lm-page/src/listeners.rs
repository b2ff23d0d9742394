//! Listener registry
//!
//! Maps `(element, event type)` to the controller actions bound there. The
//! registry is filled once during bootstrap; dispatch only reads it.

use crate::controllers::{OverlayKind, TabGroupKind};
use lm_dom::{EventType, NodeId};
use std::collections::HashMap;

/// A controller action bound to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    NavToggle,
    NavClose,
    NavEscape,
    TabClick(TabGroupKind),
    OverlayOpen(OverlayKind),
    OverlayClose(OverlayKind),
    OverlayEscape(OverlayKind),
    FormSubmit,
    ContactBlur,
    FieldFocus,
    TrackClick,
    FaqToggle,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<(NodeId, EventType), Vec<Handler>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `addEventListener`; handlers on one element run in registration order
    pub fn add(&mut self, target: NodeId, event_type: EventType, handler: Handler) {
        self.listeners
            .entry((target, event_type))
            .or_default()
            .push(handler);
    }

    /// Handlers bound to `target` for `event_type`
    pub fn handlers(&self, target: NodeId, event_type: EventType) -> &[Handler] {
        self.listeners
            .get(&(target, event_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of bound handlers
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let mut registry = ListenerRegistry::new();
        registry.add(NodeId::ROOT, EventType::Click, Handler::NavToggle);
        registry.add(NodeId::ROOT, EventType::Click, Handler::TrackClick);
        registry.add(NodeId::ROOT, EventType::KeyDown, Handler::NavEscape);

        assert_eq!(
            registry.handlers(NodeId::ROOT, EventType::Click),
            &[Handler::NavToggle, Handler::TrackClick]
        );
        assert!(registry.handlers(NodeId::ROOT, EventType::Submit).is_empty());
        assert_eq!(registry.len(), 3);
    }
}
