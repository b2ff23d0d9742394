//! Form Controls
//!
//! Live value/checked state for `input`, `select` and `textarea`, form reset,
//! and `FormData` collection.

use crate::{DomTree, NodeId};

const BUTTON_INPUT_TYPES: [&str; 5] = ["submit", "button", "reset", "image", "file"];

/// Form data for submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the named, enabled controls of `form` in document order
    pub fn from_form(tree: &DomTree, form: NodeId) -> Self {
        let mut data = Self::new();
        for control in form_controls(tree, form) {
            let Some(el) = tree.element(control) else { continue };
            let Some(name) = el.get_attr("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if el.has_attr("disabled") {
                continue;
            }
            match el.tag.as_str() {
                "input" => {
                    let kind = input_type(tree, control);
                    if BUTTON_INPUT_TYPES.contains(&kind.as_str()) {
                        continue;
                    }
                    if (kind == "checkbox" || kind == "radio") && !is_checked(tree, control) {
                        continue;
                    }
                    if (kind == "checkbox" || kind == "radio") && !el.has_attr("value") {
                        data.append(name, "on");
                        continue;
                    }
                }
                "select" | "textarea" => {}
                _ => continue,
            }
            data.append(name, control_value(tree, control));
        }
        data
    }

    /// Append a text value
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Get the first value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if key exists
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Submittable/resettable controls under `form`, in document order
pub fn form_controls(tree: &DomTree, form: NodeId) -> Vec<NodeId> {
    tree.descendants(form)
        .filter(|&id| {
            matches!(
                tree.tag_name(id),
                Some("input" | "select" | "textarea" | "button")
            )
        })
        .collect()
}

/// Lowercased `type` of an input, defaulting to `text`
pub fn input_type(tree: &DomTree, id: NodeId) -> String {
    tree.get_attribute(id, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "text".to_string())
}

/// Current value of a form control
pub fn control_value(tree: &DomTree, id: NodeId) -> String {
    let Some(el) = tree.element(id) else {
        return String::new();
    };
    if let Some(value) = &el.state.value {
        return value.clone();
    }
    match el.tag.as_str() {
        "textarea" => tree.text_content(id),
        "select" => default_option(tree, id)
            .map(|opt| option_value(tree, opt))
            .unwrap_or_default(),
        _ => el.get_attr("value").unwrap_or_default().to_string(),
    }
}

/// Set the live value of a form control
pub fn set_control_value(tree: &mut DomTree, id: NodeId, value: &str) {
    if let Some(el) = tree.element_mut(id) {
        el.state.value = Some(value.to_string());
    }
}

/// Checkedness of a checkbox/radio
pub fn is_checked(tree: &DomTree, id: NodeId) -> bool {
    tree.element(id)
        .map(|el| el.state.checked.unwrap_or_else(|| el.has_attr("checked")))
        .unwrap_or(false)
}

pub fn set_checked(tree: &mut DomTree, id: NodeId, checked: bool) {
    if let Some(el) = tree.element_mut(id) {
        el.state.checked = Some(checked);
    }
}

/// `form.reset()`: every control returns to its markup default
pub fn reset_form(tree: &mut DomTree, form: NodeId) {
    for control in form_controls(tree, form) {
        if let Some(el) = tree.element_mut(control) {
            el.state = Default::default();
        }
    }
}

/// Nearest ancestor `<form>`
pub fn form_owner(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id)
        .find(|&a| tree.tag_name(a) == Some("form"))
}

/// Check if activating the element submits its form
pub fn is_submit_button(tree: &DomTree, id: NodeId) -> bool {
    match tree.tag_name(id) {
        Some("button") => {
            let kind = tree
                .get_attribute(id, "type")
                .map(|t| t.trim().to_ascii_lowercase());
            matches!(kind.as_deref(), None | Some("") | Some("submit"))
        }
        Some("input") => matches!(input_type(tree, id).as_str(), "submit" | "image"),
        _ => false,
    }
}

fn default_option(tree: &DomTree, select: NodeId) -> Option<NodeId> {
    let options: Vec<NodeId> = tree
        .descendants(select)
        .filter(|&id| tree.tag_name(id) == Some("option"))
        .collect();
    options
        .iter()
        .copied()
        .find(|&opt| tree.has_attribute(opt, "selected"))
        .or_else(|| options.first().copied())
}

fn option_value(tree: &DomTree, option: NodeId) -> String {
    match tree.get_attribute(option, "value") {
        Some(value) => value.to_string(),
        None => tree.text_content(option).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        tree.append_child(tree.root(), form);

        let name = tree.create_element("input");
        tree.set_attribute(name, "name", "company");
        tree.set_attribute(name, "value", "Acme");
        tree.append_child(form, name);

        let select = tree.create_element("select");
        tree.set_attribute(select, "name", "scale");
        tree.append_child(form, select);
        for (value, selected) in [("small", false), ("large", true)] {
            let opt = tree.create_element("option");
            tree.set_attribute(opt, "value", value);
            if selected {
                tree.set_attribute(opt, "selected", "");
            }
            tree.append_child(select, opt);
        }

        let agree = tree.create_element("input");
        tree.set_attribute(agree, "type", "checkbox");
        tree.set_attribute(agree, "name", "agree");
        tree.append_child(form, agree);

        let button = tree.create_element("button");
        tree.set_attribute(button, "name", "go");
        tree.append_child(form, button);

        (tree, form, name, agree, button)
    }

    #[test]
    fn test_form_data_defaults() {
        let (tree, form, ..) = form();
        let data = FormData::from_form(&tree, form);
        assert_eq!(data.get("company"), Some("Acme"));
        assert_eq!(data.get("scale"), Some("large"));
        assert!(!data.has("agree"));
        assert!(!data.has("go"));
    }

    #[test]
    fn test_entries_in_document_order() {
        let (mut tree, form, _name, agree, _) = form();
        set_checked(&mut tree, agree, true);
        let data = FormData::from_form(&tree, form);
        let entries: Vec<_> = data.entries().collect();
        assert_eq!(entries, [("company", "Acme"), ("scale", "large"), ("agree", "on")]);
    }

    #[test]
    fn test_checkbox_on_value() {
        let (mut tree, form, _name, agree, _) = form();
        set_checked(&mut tree, agree, true);
        let data = FormData::from_form(&tree, form);
        assert_eq!(data.get("agree"), Some("on"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut tree, form, name, agree, _) = form();
        set_control_value(&mut tree, name, "Other Co");
        set_checked(&mut tree, agree, true);
        assert_eq!(control_value(&tree, name), "Other Co");

        reset_form(&mut tree, form);
        assert_eq!(control_value(&tree, name), "Acme");
        assert!(!is_checked(&tree, agree));
    }

    #[test]
    fn test_submit_button_detection() {
        let (mut tree, form, name, _agree, button) = form();
        assert!(is_submit_button(&tree, button));
        assert!(!is_submit_button(&tree, name));
        tree.set_attribute(button, "type", "button");
        assert!(!is_submit_button(&tree, button));
        assert_eq!(form_owner(&tree, name), Some(form));
    }
}
