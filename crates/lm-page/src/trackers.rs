//! Declarative click tracking and FAQ expansion tracking
//!
//! Any element carrying `data-track` reports clicks under that name, with an
//! optional JSON object in `data-payload`. Both attributes are read at click
//! time so later rewrites (e.g. by the variant engine) are honored.

use crate::error::HandlerError;
use crate::listeners::{Handler, ListenerRegistry};
use crate::page::PageContext;
use crate::query::{select, select_all_in_document};
use crate::tracker::Payload;
use lm_dom::{EventType, NodeId};
use serde_json::Value;

pub const FAQ_EXPAND_EVENT: &str = "faq_expand";

const TRACKED: &str = "[data-track]";
const FAQ_ITEMS: &str = "#faq details";

#[derive(Debug, Clone)]
pub struct ClickTracker {
    targets: Vec<NodeId>,
}

impl ClickTracker {
    pub fn setup(ctx: &mut PageContext, listeners: &mut ListenerRegistry) -> Option<Self> {
        let targets = select_all_in_document(&ctx.document, TRACKED);
        if targets.is_empty() {
            return None;
        }
        for &target in &targets {
            listeners.add(target, EventType::Click, Handler::TrackClick);
        }
        tracing::debug!(targets = targets.len(), "click tracking bound");
        Some(Self { targets })
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Track a click on `element`
    ///
    /// A malformed `data-payload` fails this handler only.
    pub fn on_click(&self, ctx: &mut PageContext, element: NodeId) -> Result<(), HandlerError> {
        let tree = &ctx.document.tree;
        let Some(name) = tree.dataset_get(element, "track").map(str::to_string) else {
            tracing::debug!("data-track removed before click; nothing to track");
            return Ok(());
        };

        let payload = match tree.dataset_get(element, "payload").filter(|p| !p.is_empty()) {
            Some(raw) => parse_payload(&name, raw)?,
            None => Payload::new(),
        };

        ctx.tracker.track(&name, payload);
        Ok(())
    }
}

fn parse_payload(event: &str, raw: &str) -> Result<Payload, HandlerError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| HandlerError::Payload {
        event: event.to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => {
            tracing::warn!("data-payload for {:?} is not an object: {}", event, other);
            Ok(Payload::new())
        }
    }
}

#[derive(Debug, Clone)]
pub struct FaqTracker {
    items: Vec<NodeId>,
}

impl FaqTracker {
    pub fn setup(ctx: &mut PageContext, listeners: &mut ListenerRegistry) -> Option<Self> {
        let items = select_all_in_document(&ctx.document, FAQ_ITEMS);
        if items.is_empty() {
            return None;
        }
        for &item in &items {
            listeners.add(item, EventType::Toggle, Handler::FaqToggle);
        }
        Some(Self { items })
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Track expansion only; collapsing emits nothing
    pub fn on_toggle(&self, ctx: &mut PageContext, details: NodeId) {
        if !ctx.document.tree.has_attribute(details, "open") {
            return;
        }
        let mut payload = Payload::new();
        if let Some(summary) = select(&ctx.document, "summary", details) {
            let question = ctx.document.tree.text_content(summary).trim().to_string();
            payload.insert("question".to_string(), Value::String(question));
        }
        ctx.tracker.track(FAQ_EXPAND_EVENT, payload);
    }
}
