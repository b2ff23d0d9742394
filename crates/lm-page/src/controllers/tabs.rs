//! Exclusive tab groups (scenario tabs, modal template tabs)

use crate::listeners::{Handler, ListenerRegistry};
use crate::page::PageContext;
use crate::query::select_all_in_document;
use crate::tracker::Payload;
use lm_dom::{EventType, NodeId};
use serde_json::Value;

/// Which tab group on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabGroupKind {
    Scenario,
    ModalTemplates,
}

/// Markup contract of one tab group
struct TabSpec {
    tabs: &'static str,
    panels: &'static str,
    /// Dataset key naming a tab
    tab_key: &'static str,
    /// Dataset key naming a panel
    panel_key: &'static str,
    /// Panels also carry `aria-hidden`
    panel_aria: bool,
    /// Event emitted on click, with the tab name under `payload_key`
    click_event: Option<(&'static str, &'static str)>,
}

impl TabGroupKind {
    fn spec(&self) -> TabSpec {
        match self {
            TabGroupKind::Scenario => TabSpec {
                tabs: ".scenario-tab",
                panels: ".scenario-panel",
                tab_key: "scenario",
                panel_key: "panel",
                panel_aria: true,
                click_event: Some(("scenario_tab_click", "scenario")),
            },
            TabGroupKind::ModalTemplates => TabSpec {
                tabs: ".modal-tab",
                panels: ".template-panel",
                tab_key: "template",
                panel_key: "templatePanel",
                panel_aria: false,
                click_event: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabGroup {
    kind: TabGroupKind,
    tabs: Vec<NodeId>,
    panels: Vec<NodeId>,
}

impl TabGroup {
    /// Bind every tab and activate the first one; no tabs, no group
    pub fn setup(
        ctx: &mut PageContext,
        listeners: &mut ListenerRegistry,
        kind: TabGroupKind,
    ) -> Option<Self> {
        let spec = kind.spec();
        let tabs = select_all_in_document(&ctx.document, spec.tabs);
        let first = *tabs.first()?;
        let panels = select_all_in_document(&ctx.document, spec.panels);

        for &tab in &tabs {
            listeners.add(tab, EventType::Click, Handler::TabClick(kind));
        }

        let group = Self { kind, tabs, panels };
        let initial = group.tab_name(ctx, first);
        group.activate(ctx, initial.as_deref());

        tracing::debug!(?kind, tabs = group.tabs.len(), panels = group.panels.len(), "tab group bound");
        Some(group)
    }

    fn tab_name(&self, ctx: &PageContext, tab: NodeId) -> Option<String> {
        ctx.document
            .tree
            .dataset_get(tab, self.kind.spec().tab_key)
            .map(str::to_string)
    }

    /// Mark the tab/panel pair named `name` active and every other inactive
    pub fn activate(&self, ctx: &mut PageContext, name: Option<&str>) {
        let spec = self.kind.spec();
        let tree = &mut ctx.document.tree;

        for &tab in &self.tabs {
            let active = tree.dataset_get(tab, spec.tab_key) == name;
            tree.toggle_class(tab, "active", Some(active));
            tree.set_attribute(tab, "aria-selected", if active { "true" } else { "false" });
        }
        for &panel in &self.panels {
            let active = tree.dataset_get(panel, spec.panel_key) == name;
            tree.toggle_class(panel, "active", Some(active));
            if spec.panel_aria {
                tree.set_attribute(panel, "aria-hidden", if active { "false" } else { "true" });
            }
        }
    }

    /// Name of the currently active tab
    pub fn active(&self, ctx: &PageContext) -> Option<String> {
        self.tabs
            .iter()
            .find(|&&tab| ctx.document.tree.has_class(tab, "active"))
            .and_then(|&tab| self.tab_name(ctx, tab))
    }

    pub fn on_click(&self, ctx: &mut PageContext, tab: NodeId) {
        let name = self.tab_name(ctx, tab);
        self.activate(ctx, name.as_deref());

        if let Some((event, key)) = self.kind.spec().click_event {
            let mut payload = Payload::new();
            if let Some(name) = name {
                payload.insert(key.to_string(), Value::String(name));
            }
            ctx.tracker.track(event, payload);
        }
    }
}
