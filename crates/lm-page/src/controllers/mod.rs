//! Interaction Controllers
//!
//! Each controller binds listeners to its own subtree once at bootstrap and
//! never calls another controller. A controller whose root elements are
//! missing from the page is not created at all.

mod contact_form;
mod nav;
mod overlay;
mod tabs;
pub mod toast;

pub use contact_form::{ContactForm, FORM_FAIL_EVENT, FORM_START_EVENT, FORM_SUCCESS_EVENT};
pub use nav::MobileNav;
pub use overlay::{Overlay, OverlayKind};
pub use tabs::{TabGroup, TabGroupKind};
