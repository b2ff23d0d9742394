//! Modal dialog and side drawer
//!
//! Both are the same two-state machine keyed on the root's `aria-hidden`:
//! openers anywhere on the page, closers (buttons and backdrop) inside the
//! root, Escape while focus is inside the root.

use crate::listeners::{Handler, ListenerRegistry};
use crate::page::PageContext;
use crate::query::{select_all, select_all_in_document, select_in_document};
use crate::scroll_lock::LockOwner;
use lm_dom::{DomEvent, EventType, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// `#template-modal`
    TemplateModal,
    /// `#compliance-drawer`
    ComplianceDrawer,
}

impl OverlayKind {
    fn root(&self) -> &'static str {
        match self {
            OverlayKind::TemplateModal => "#template-modal",
            OverlayKind::ComplianceDrawer => "#compliance-drawer",
        }
    }

    fn openers(&self) -> &'static str {
        match self {
            OverlayKind::TemplateModal => "[data-modal-open='template-modal']",
            OverlayKind::ComplianceDrawer => "[data-drawer-open='compliance-drawer']",
        }
    }

    fn closers(&self) -> &'static str {
        match self {
            OverlayKind::TemplateModal => "[data-modal-close]",
            OverlayKind::ComplianceDrawer => "[data-drawer-close]",
        }
    }

    /// Event emitted on each closed -> open transition
    pub fn view_event(&self) -> &'static str {
        match self {
            OverlayKind::TemplateModal => "template_modal_view",
            OverlayKind::ComplianceDrawer => "compliance_view",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Overlay {
    kind: OverlayKind,
    root: NodeId,
}

impl Overlay {
    pub fn setup(
        ctx: &mut PageContext,
        listeners: &mut ListenerRegistry,
        kind: OverlayKind,
    ) -> Option<Self> {
        let root = select_in_document(&ctx.document, kind.root())?;

        let openers = select_all_in_document(&ctx.document, kind.openers());
        for &opener in &openers {
            listeners.add(opener, EventType::Click, Handler::OverlayOpen(kind));
        }
        let closers = select_all(&ctx.document, kind.closers(), root);
        for &closer in &closers {
            listeners.add(closer, EventType::Click, Handler::OverlayClose(kind));
        }
        listeners.add(root, EventType::KeyDown, Handler::OverlayEscape(kind));

        tracing::debug!(?kind, openers = openers.len(), closers = closers.len(), "overlay bound");
        Some(Self { kind, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_open(&self, ctx: &PageContext) -> bool {
        ctx.document.tree.get_attribute(self.root, "aria-hidden") == Some("false")
    }

    /// Show the overlay; already open means no transition and no event
    pub fn open(&self, ctx: &mut PageContext) {
        if self.is_open(ctx) {
            return;
        }
        ctx.document.tree.set_attribute(self.root, "aria-hidden", "false");
        ctx.scroll_lock.acquire(&mut ctx.document, LockOwner::Overlay(self.kind));
        ctx.tracker.track_name(self.kind.view_event());
    }

    /// Hide the overlay and release its scroll lock on every path
    pub fn close(&self, ctx: &mut PageContext) {
        ctx.document.tree.set_attribute(self.root, "aria-hidden", "true");
        ctx.scroll_lock.release(&mut ctx.document, LockOwner::Overlay(self.kind));
    }

    pub fn on_key_down(&self, ctx: &mut PageContext, event: &DomEvent) {
        if event.is_key("Escape") {
            self.close(ctx);
        }
    }
}
