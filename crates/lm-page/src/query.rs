//! DOM Query Helpers
//!
//! `select`/`select_all` over a scope node. Results are never cached; callers
//! re-query when the page may have changed.

use lm_dom::{Document, NodeId, Selector};

/// First element under `scope` matching `selector`
///
/// Selectors here are part of the fixed markup contract; an unparsable one
/// is logged and treated as matching nothing.
pub fn select(doc: &Document, selector: &str, scope: NodeId) -> Option<NodeId> {
    let selector = parse(selector)?;
    doc.tree().query_selector(scope, &selector)
}

/// All elements under `scope` matching `selector`, in document order
pub fn select_all(doc: &Document, selector: &str, scope: NodeId) -> Vec<NodeId> {
    match parse(selector) {
        Some(selector) => doc.tree().query_selector_all(scope, &selector),
        None => Vec::new(),
    }
}

/// [`select`] scoped to the whole document
pub fn select_in_document(doc: &Document, selector: &str) -> Option<NodeId> {
    select(doc, selector, doc.root())
}

/// [`select_all`] scoped to the whole document
pub fn select_all_in_document(doc: &Document, selector: &str) -> Vec<NodeId> {
    select_all(doc, selector, doc.root())
}

fn parse(selector: &str) -> Option<Selector> {
    Selector::parse(selector)
        .map_err(|e| tracing::warn!("ignoring selector: {}", e))
        .ok()
}
