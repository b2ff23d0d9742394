//! Page scroll lock
//!
//! Open overlays suppress page scrolling through a class on `<body>`. Owners
//! are kept on a small stack: the class stays while any owner holds the lock
//! and is removed when the last one releases.

use crate::controllers::OverlayKind;
use lm_dom::Document;

/// Who holds the scroll lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOwner {
    MobileNav,
    Overlay(OverlayKind),
}

#[derive(Debug, Clone)]
pub struct ScrollLock {
    class: String,
    holders: Vec<LockOwner>,
}

impl ScrollLock {
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            holders: Vec::new(),
        }
    }

    /// Take the lock for `owner`; acquiring twice is a no-op
    pub fn acquire(&mut self, doc: &mut Document, owner: LockOwner) {
        if !self.holders.contains(&owner) {
            self.holders.push(owner);
        }
        self.apply(doc);
    }

    /// Release `owner`'s hold; releasing without holding is a no-op
    pub fn release(&mut self, doc: &mut Document, owner: LockOwner) {
        self.holders.retain(|&h| h != owner);
        self.apply(doc);
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn holders(&self) -> &[LockOwner] {
        &self.holders
    }

    fn apply(&self, doc: &mut Document) {
        let Some(body) = doc.body() else { return };
        if self.holders.is_empty() {
            doc.tree.remove_class(body, &self.class);
        } else {
            doc.tree.add_class(body, &self.class);
        }
    }
}
