//! Page Runtime
//!
//! Owns the document and everything the behaviors share, boots the
//! controllers once and delivers events to them. Hosts drive the page
//! through the interaction helpers ([`Page::click`], [`Page::key_down`], ...)
//! which also perform the browser default actions the behaviors rely on.

use crate::config::Config;
use crate::controllers::{
    toast, ContactForm, MobileNav, Overlay, OverlayKind, TabGroup, TabGroupKind,
};
use crate::error::HandlerError;
use crate::listeners::{Handler, ListenerRegistry};
use crate::query::{select_all_in_document, select_in_document};
use crate::scroll_lock::ScrollLock;
use crate::timers::{TimerQueue, TimerTask};
use crate::tracker::{EventSink, Tracker};
use crate::trackers::{ClickTracker, FaqTracker};
use crate::variants::{apply_variants, Assignments, QueryParams};
use lm_dom::{forms, Document, DomEvent, EventType, NodeId};
use std::time::Duration;

/// State shared by every behavior
#[derive(Debug)]
pub struct PageContext {
    pub document: Document,
    pub tracker: Tracker,
    pub scroll_lock: ScrollLock,
    pub timers: TimerQueue,
    pub config: Config,
}

/// Result of delivering one event
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    /// Handlers that failed; the others still ran
    pub errors: Vec<HandlerError>,
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn merge(&mut self, other: DispatchOutcome) {
        self.default_prevented |= other.default_prevented;
        self.errors.extend(other.errors);
    }
}

#[derive(Debug, Default)]
struct Controllers {
    nav: Option<MobileNav>,
    scenario_tabs: Option<TabGroup>,
    modal: Option<Overlay>,
    modal_tabs: Option<TabGroup>,
    drawer: Option<Overlay>,
    contact_form: Option<ContactForm>,
    clicks: Option<ClickTracker>,
    faq: Option<FaqTracker>,
}

impl Controllers {
    fn tabs(&self, kind: TabGroupKind) -> Option<&TabGroup> {
        match kind {
            TabGroupKind::Scenario => self.scenario_tabs.as_ref(),
            TabGroupKind::ModalTemplates => self.modal_tabs.as_ref(),
        }
    }

    fn overlay(&self, kind: OverlayKind) -> Option<&Overlay> {
        match kind {
            OverlayKind::TemplateModal => self.modal.as_ref(),
            OverlayKind::ComplianceDrawer => self.drawer.as_ref(),
        }
    }
}

/// A landing page with its behaviors attached
#[derive(Debug)]
pub struct Page {
    ctx: PageContext,
    listeners: ListenerRegistry,
    controllers: Controllers,
    booted: bool,
    focused: Option<NodeId>,
    assignments: Assignments,
}

impl Page {
    pub fn new(document: Document, sink: impl EventSink + 'static, config: Config) -> Self {
        let scroll_lock = ScrollLock::new(&config.scroll_lock_class);
        Self {
            ctx: PageContext {
                document,
                tracker: Tracker::new(sink),
                scroll_lock,
                timers: TimerQueue::new(),
                config,
            },
            listeners: ListenerRegistry::new(),
            controllers: Controllers::default(),
            booted: false,
            focused: None,
            assignments: Assignments::new(),
        }
    }

    pub fn with_defaults(document: Document, sink: impl EventSink + 'static) -> Self {
        Self::new(document, sink, Config::default())
    }

    /// Run the page-ready bootstrap; later calls do nothing
    ///
    /// Variants are applied before any controller binds, so rewritten
    /// markup is what the controllers see.
    pub fn ready(&mut self) -> &Assignments {
        if self.booted {
            return &self.assignments;
        }
        self.booted = true;

        let params = match QueryParams::from_url(self.ctx.document.url()) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!("{}; skipping variants", e);
                QueryParams::default()
            }
        };
        let ctx = &mut self.ctx;
        self.assignments = apply_variants(&mut ctx.document, &params, &ctx.config, &mut ctx.tracker);

        let listeners = &mut self.listeners;
        let c = &mut self.controllers;
        c.nav = MobileNav::setup(ctx, listeners);
        c.scenario_tabs = TabGroup::setup(ctx, listeners, TabGroupKind::Scenario);
        c.modal = Overlay::setup(ctx, listeners, OverlayKind::TemplateModal);
        c.modal_tabs = TabGroup::setup(ctx, listeners, TabGroupKind::ModalTemplates);
        c.drawer = Overlay::setup(ctx, listeners, OverlayKind::ComplianceDrawer);
        c.contact_form = ContactForm::setup(ctx, listeners);
        c.clicks = ClickTracker::setup(ctx, listeners);
        c.faq = FaqTracker::setup(ctx, listeners);

        tracing::info!(
            listeners = self.listeners.len(),
            variants = self.assignments.len(),
            "page ready"
        );
        &self.assignments
    }

    pub fn is_ready(&self) -> bool {
        self.booted
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, event_type: EventType, target: NodeId) -> DispatchOutcome {
        self.dispatch_event(DomEvent::new(event_type, target))
    }

    /// Deliver `event` to its target, then up the ancestor chain if it bubbles
    pub fn dispatch_event(&mut self, mut event: DomEvent) -> DispatchOutcome {
        let mut path = vec![event.target];
        if event.bubbles() {
            path.extend(self.ctx.document.tree.ancestors(event.target));
        }

        let mut outcome = DispatchOutcome::default();
        for node in path {
            let handlers = self.listeners.handlers(node, event.event_type).to_vec();
            if handlers.is_empty() {
                continue;
            }
            event.current_target = node;
            for handler in handlers {
                if let Err(e) = self.run(handler, &mut event) {
                    tracing::warn!(event = %event.event_type, ?handler, "handler failed: {}", e);
                    outcome.errors.push(e);
                }
            }
        }

        outcome.default_prevented = event.is_default_prevented();
        outcome
    }

    fn run(&mut self, handler: Handler, event: &mut DomEvent) -> Result<(), HandlerError> {
        let Self { ctx, controllers, .. } = self;
        let node = event.current_target;

        match handler {
            Handler::NavToggle => {
                if let Some(nav) = &controllers.nav {
                    nav.toggle(ctx);
                }
            }
            Handler::NavClose => {
                if let Some(nav) = &controllers.nav {
                    nav.close(ctx);
                }
            }
            Handler::NavEscape => {
                if let Some(nav) = &controllers.nav {
                    nav.on_key_down(ctx, event);
                }
            }
            Handler::TabClick(kind) => {
                if let Some(group) = controllers.tabs(kind) {
                    group.on_click(ctx, node);
                }
            }
            Handler::OverlayOpen(kind) => {
                if let Some(overlay) = controllers.overlay(kind) {
                    overlay.open(ctx);
                }
            }
            Handler::OverlayClose(kind) => {
                if let Some(overlay) = controllers.overlay(kind) {
                    overlay.close(ctx);
                }
            }
            Handler::OverlayEscape(kind) => {
                if let Some(overlay) = controllers.overlay(kind) {
                    overlay.on_key_down(ctx, event);
                }
            }
            Handler::FormSubmit => {
                if let Some(form) = &controllers.contact_form {
                    form.on_submit(ctx, event);
                }
            }
            Handler::ContactBlur => {
                if let Some(form) = &controllers.contact_form {
                    form.on_contact_blur(ctx);
                }
            }
            Handler::FieldFocus => {
                if let Some(form) = &controllers.contact_form {
                    form.on_field_focus(ctx, node);
                }
            }
            Handler::TrackClick => {
                if let Some(clicks) = &controllers.clicks {
                    clicks.on_click(ctx, node)?;
                }
            }
            Handler::FaqToggle => {
                if let Some(faq) = &controllers.faq {
                    faq.on_toggle(ctx, node);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------

    /// Click `target`, then run the default action unless prevented
    ///
    /// Default actions: a `<summary>` toggles its `<details>` (firing
    /// `toggle`); a submit button submits its form.
    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        let mut outcome = self.dispatch(EventType::Click, target);
        if outcome.default_prevented {
            return outcome;
        }

        if let Some(details) = self.summary_details(target) {
            let tree = &mut self.ctx.document.tree;
            if tree.has_attribute(details, "open") {
                tree.remove_attribute(details, "open");
            } else {
                tree.set_attribute(details, "open", "");
            }
            outcome.merge(self.dispatch(EventType::Toggle, details));
        } else if let Some(form) = self.submitter_form(target) {
            outcome.merge(self.submit(form));
        }
        outcome
    }

    /// Click the first element matching `selector`; `None` if nothing matches
    pub fn click_selector(&mut self, selector: &str) -> Option<DispatchOutcome> {
        let target = self.select(selector)?;
        Some(self.click(target))
    }

    pub fn key_down(&mut self, target: NodeId, key: &str) -> DispatchOutcome {
        self.dispatch_event(DomEvent::key_down(target, key))
    }

    /// Move focus to `target`, blurring the previously focused element
    pub fn focus(&mut self, target: NodeId) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        match self.focused {
            Some(current) if current == target => return outcome,
            Some(current) => outcome.merge(self.blur(current)),
            None => {}
        }
        self.focused = Some(target);
        outcome.merge(self.dispatch(EventType::Focus, target));
        outcome
    }

    pub fn blur(&mut self, target: NodeId) -> DispatchOutcome {
        if self.focused == Some(target) {
            self.focused = None;
        }
        self.dispatch(EventType::Blur, target)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Fire `submit` on `form`
    pub fn submit(&mut self, form: NodeId) -> DispatchOutcome {
        let outcome = self.dispatch(EventType::Submit, form);
        if !outcome.default_prevented {
            tracing::debug!(?form, "submit not prevented; form would navigate");
        }
        outcome
    }

    /// Type into a control (no events, like assigning `.value`)
    pub fn set_value(&mut self, control: NodeId, value: &str) {
        forms::set_control_value(&mut self.ctx.document.tree, control, value);
    }

    pub fn set_checked(&mut self, control: NodeId, checked: bool) {
        forms::set_checked(&mut self.ctx.document.tree, control, checked);
    }

    /// Advance the virtual clock and run the timers that came due
    pub fn advance(&mut self, by: Duration) {
        for task in self.ctx.timers.advance(by) {
            match task {
                TimerTask::HideToast(toast) => toast::hide(&mut self.ctx, toast),
            }
        }
    }

    fn summary_details(&self, target: NodeId) -> Option<NodeId> {
        let tree = &self.ctx.document.tree;
        let summary = std::iter::once(target)
            .chain(tree.ancestors(target))
            .find(|&n| tree.tag_name(n) == Some("summary"))?;
        tree.parent_element(summary)
            .filter(|&p| tree.tag_name(p) == Some("details"))
    }

    fn submitter_form(&self, target: NodeId) -> Option<NodeId> {
        let tree = &self.ctx.document.tree;
        let button = std::iter::once(target)
            .chain(tree.ancestors(target))
            .find(|&n| forms::is_submit_button(tree, n))?;
        forms::form_owner(tree, button)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.ctx.document
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    /// Variants applied during bootstrap
    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.ctx.scroll_lock
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn is_nav_open(&self) -> bool {
        self.controllers
            .nav
            .as_ref()
            .is_some_and(|nav| nav.is_open(&self.ctx))
    }

    pub fn is_overlay_open(&self, kind: OverlayKind) -> bool {
        self.controllers
            .overlay(kind)
            .is_some_and(|overlay| overlay.is_open(&self.ctx))
    }

    /// Name of the active tab in a group
    pub fn active_tab(&self, kind: TabGroupKind) -> Option<String> {
        self.controllers.tabs(kind)?.active(&self.ctx)
    }

    pub fn select(&self, selector: &str) -> Option<NodeId> {
        select_in_document(&self.ctx.document, selector)
    }

    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        select_all_in_document(&self.ctx.document, selector)
    }
}
