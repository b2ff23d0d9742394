//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lm_dom::{Document, DomTree, NodeId};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    ///
    /// Never fails: html5ever recovers from malformed markup the same way
    /// browsers do.
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.root();
        self.convert_node(&dom.document, document.tree_mut(), root);

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if text.trim().is_empty() && is_formatting_parent(tree, parent) {
                    return;
                }
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

/// Whitespace directly under these nodes is source formatting only; anywhere
/// else it is part of `textContent`.
fn is_formatting_parent(tree: &DomTree, parent: NodeId) -> bool {
    match tree.tag_name(parent) {
        Some(tag) => matches!(tag, "html" | "head"),
        None => parent == NodeId::ROOT,
    }
}
