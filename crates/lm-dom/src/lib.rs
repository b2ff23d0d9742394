//! Lianmai DOM - Document Object Model
//!
//! Arena-backed DOM tree that the landing page behaviors run against.
//! Nodes live in a single `Vec` and refer to each other through [`NodeId`].

mod classlist;
pub mod dataset;
mod document;
pub mod events;
pub mod forms;
mod node;
pub mod selector;
mod serialize;
mod tree;

pub use classlist::DOMTokenList;
pub use document::Document;
pub use events::{DomEvent, EventType};
pub use forms::FormData;
pub use node::{Attribute, ControlState, ElementData, Node, NodeData};
pub use selector::{Selector, SelectorError};
pub use serialize::to_html;
pub use tree::{Ancestors, Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
