//! Mobile navigation drawer

use crate::listeners::{Handler, ListenerRegistry};
use crate::page::PageContext;
use crate::query::{select_all_in_document, select_in_document};
use crate::scroll_lock::LockOwner;
use lm_dom::{DomEvent, EventType, NodeId};

const TOGGLE: &str = ".nav-toggle";
const NAV: &str = ".site-nav";
const NAV_LINKS: &str = ".site-nav a";
const OVERLAY_CLASS: &str = "mobile-nav-overlay";

/// Open/close state lives in the DOM: the nav's `open` class.
#[derive(Debug, Clone)]
pub struct MobileNav {
    toggle: NodeId,
    nav: NodeId,
    overlay: NodeId,
}

impl MobileNav {
    /// Bind the toggle, links and a freshly created backdrop overlay
    pub fn setup(ctx: &mut PageContext, listeners: &mut ListenerRegistry) -> Option<Self> {
        let toggle = select_in_document(&ctx.document, TOGGLE)?;
        let nav = select_in_document(&ctx.document, NAV)?;
        let body = ctx.document.body()?;

        let overlay = ctx.document.tree.create_element("div");
        ctx.document.tree.set_attribute(overlay, "class", OVERLAY_CLASS);
        ctx.document.tree.append_child(body, overlay);

        listeners.add(toggle, EventType::Click, Handler::NavToggle);
        listeners.add(overlay, EventType::Click, Handler::NavClose);
        let links = select_all_in_document(&ctx.document, NAV_LINKS);
        for &link in &links {
            listeners.add(link, EventType::Click, Handler::NavClose);
        }
        listeners.add(ctx.document.root(), EventType::KeyDown, Handler::NavEscape);

        tracing::debug!("mobile nav bound with {} links", links.len());
        Some(Self { toggle, nav, overlay })
    }

    pub fn is_open(&self, ctx: &PageContext) -> bool {
        ctx.document.tree.has_class(self.nav, "open")
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn toggle(&self, ctx: &mut PageContext) {
        if self.is_open(ctx) {
            self.close(ctx);
        } else {
            self.open(ctx);
        }
    }

    pub fn open(&self, ctx: &mut PageContext) {
        let tree = &mut ctx.document.tree;
        tree.add_class(self.nav, "open");
        tree.add_class(self.overlay, "show");
        tree.set_attribute(self.toggle, "aria-expanded", "true");
        ctx.scroll_lock.acquire(&mut ctx.document, LockOwner::MobileNav);
    }

    pub fn close(&self, ctx: &mut PageContext) {
        let tree = &mut ctx.document.tree;
        tree.remove_class(self.nav, "open");
        tree.remove_class(self.overlay, "show");
        tree.set_attribute(self.toggle, "aria-expanded", "false");
        ctx.scroll_lock.release(&mut ctx.document, LockOwner::MobileNav);
    }

    /// Escape anywhere on the page closes an open nav
    pub fn on_key_down(&self, ctx: &mut PageContext, event: &DomEvent) {
        if event.is_key("Escape") && self.is_open(ctx) {
            self.close(ctx);
        }
    }
}
