//! DOM Tree (arena-based allocation)

use crate::{dataset, DOMTokenList, ElementData, Node, NodeData, NodeId, Selector};

/// Arena-based DOM tree
///
/// Node 0 is always the document node. Detached nodes stay in the arena;
/// they are simply unreachable from the root.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            tracing::trace!(?parent, ?child, "append_child ignored");
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// All descendants in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants {
            tree: self,
            root: id,
            next,
        }
    }

    /// Ancestors from the parent upwards, including the document node
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        Ancestors { tree: self, next }
    }

    /// Parent node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Parent, if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    /// Check if `ancestor` contains `id` (inclusive)
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.is_element())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| n.as_element())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| n.as_element_mut())
    }

    /// Lowercase tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.remove_attr(name))
    }

    pub fn class_list(&self, id: NodeId) -> Option<&DOMTokenList> {
        self.element(id).map(|e| e.class_list())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).is_some_and(|c| c.contains(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.update_classes(|c| c.add(class));
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.update_classes(|c| c.remove(class));
        }
    }

    /// `classList.toggle(class, force)`
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        self.element_mut(id)
            .is_some_and(|el| el.update_classes(|c| c.toggle(class, force)))
    }

    /// `dataset[key]`, with camelCase keys
    pub fn dataset_get(&self, id: NodeId, key: &str) -> Option<&str> {
        self.get_attribute(id, &dataset::to_attribute_name(key))
    }

    /// `dataset[key] = value`, with camelCase keys
    pub fn dataset_set(&mut self, id: NodeId, key: &str, value: &str) {
        self.set_attribute(id, &dataset::to_attribute_name(key), value);
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(|n| n.as_text()))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(content)) | Some(NodeData::Comment(content)) => {
                *content = text.to_string();
                return;
            }
            Some(_) => {}
            None => return,
        }

        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First descendant element of `scope` matching `selector`
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&id| selector.matches(self, id))
    }

    /// All descendant elements of `scope` matching `selector`, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| selector.matches(self, id))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };

        Some(current)
    }
}

/// Iterator walking up the parent chain
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.parent);
        Some(current)
    }
}
