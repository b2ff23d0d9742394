//! DOM Node
//!
//! Nodes link to each other through [`NodeId`] indices instead of pointers,
//! which keeps the arena free of reference cycles.

use crate::{DOMTokenList, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Live state of a form control, layered over the markup defaults.
///
/// `None` means the control still shows its default (the `value`/`checked`
/// attribute, or the selected option).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub value: Option<String>,
    pub checked: Option<bool>,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in source order; `class` is kept in sync with `classes`
    attrs: Vec<Attribute>,
    /// Parsed class list
    classes: DOMTokenList,
    /// Form control state
    pub state: ControlState,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: DOMTokenList::new(),
            state: ControlState::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check for attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            self.classes = DOMTokenList::from_string(&value);
        }
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value,
        });
    }

    /// Remove an attribute, returns true if it was present
    pub fn remove_attr(&mut self, name: &str) -> bool {
        if name == "class" {
            self.classes = DOMTokenList::new();
        }
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        before != self.attrs.len()
    }

    /// Attributes in source order
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Element id
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Class list
    pub fn class_list(&self) -> &DOMTokenList {
        &self.classes
    }

    /// Mutate the class list; the `class` attribute follows
    pub fn update_classes<R>(&mut self, f: impl FnOnce(&mut DOMTokenList) -> R) -> R {
        let result = f(&mut self.classes);
        let value = self.classes.value();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == "class") {
            attr.value = value;
        } else if !value.is_empty() {
            self.attrs.push(Attribute {
                name: "class".to_string(),
                value,
            });
        }
        result
    }
}
