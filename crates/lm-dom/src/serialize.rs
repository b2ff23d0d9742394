//! HTML serialization

use crate::{DomTree, NodeData, NodeId};
use std::fmt::Write;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr", "param",
];

/// Serialize the subtree under `id` (including `id` unless it is the document)
pub fn to_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    match &node.data {
        NodeData::Document => write_children(tree, id, out),
        NodeData::Doctype { name } => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
        NodeData::Text(text) => {
            let raw = tree
                .parent_element(id)
                .and_then(|p| tree.tag_name(p))
                .is_some_and(|tag| tag == "script" || tag == "style");
            if raw {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for attr in el.attrs() {
                out.push(' ');
                out.push_str(&attr.name);
                if !attr.value.is_empty() {
                    out.push_str("=\"");
                    escape_into(&attr.value, true, out);
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            write_children(tree, id, out);
            let _ = write!(out, "</{}>", el.tag);
        }
    }
}

fn write_children(tree: &DomTree, id: NodeId, out: &mut String) {
    for child in tree.children(id) {
        write_node(tree, child, out);
    }
}

fn escape_into(text: &str, attr: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !attr => out.push_str("&lt;"),
            '>' if !attr => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_element_tree() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "class", "price");
        tree.set_attribute(div, "data-payload", r#"{"plan":"pro"}"#);
        let text = tree.create_text("<¥999> & up");
        let br = tree.create_element("br");
        tree.append_child(tree.root(), div);
        tree.append_child(div, text);
        tree.append_child(div, br);

        assert_eq!(
            to_html(&tree, tree.root()),
            r#"<div class="price" data-payload="{&quot;plan&quot;:&quot;pro&quot;}">&lt;¥999&gt; &amp; up<br></div>"#
        );
    }

    #[test]
    fn test_boolean_attribute() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.set_attribute(input, "required", "");
        tree.append_child(tree.root(), input);
        assert_eq!(to_html(&tree, input), "<input required>");
    }
}
