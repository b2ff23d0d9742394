//! Lianmai Page - landing page enhancement layer
//!
//! Runs against an already rendered [`lm_dom::Document`]:
//! - A/B variant rewriting driven by `ab_*` URL query parameters
//! - Interaction controllers (mobile nav, tabs, modal, drawer, contact form)
//! - Event tracking into an append-only data layer
//!
//! Every behavior degrades to a no-op when its elements are absent.
//!
//! ```ignore
//! let layer = DataLayer::new();
//! let mut page = Page::with_defaults(document, layer.clone());
//! page.ready();
//! page.click_selector("[data-modal-open='template-modal']");
//! assert_eq!(layer.names(), vec!["template_modal_view"]);
//! ```

pub mod config;
pub mod controllers;
pub mod error;
pub mod listeners;
mod page;
pub mod query;
pub mod scroll_lock;
pub mod timers;
pub mod tracker;
pub mod trackers;
pub mod validator;
pub mod variants;

pub use config::Config;
pub use controllers::{OverlayKind, TabGroupKind};
pub use error::{HandlerError, PageError};
pub use page::{DispatchOutcome, Page, PageContext};
pub use scroll_lock::{LockOwner, ScrollLock};
pub use tracker::{DataLayer, EventSink, Payload, TrackedEvent, Tracker};
pub use validator::is_valid_contact;
pub use variants::{apply_variants, Assignments, QueryParams, VariantKey};
