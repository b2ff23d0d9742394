//! Document - High-level document API

use crate::{DomTree, NodeId, Selector, SelectorError};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
}

impl Document {
    /// Create a document with an `html > (head, body)` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree
            .children(self.root())
            .find(|&id| self.tree.tag_name(id) == Some("html"))
    }

    /// Get `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.tree
            .children(html)
            .find(|&id| self.tree.tag_name(id) == Some("body"))
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root())
            .find(|&node| self.tree.get_attribute(node, "id") == Some(id))
    }

    /// `scope.querySelector(selector)`
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector(scope, &selector))
    }

    /// `scope.querySelectorAll(selector)`
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector_all(scope, &selector))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
