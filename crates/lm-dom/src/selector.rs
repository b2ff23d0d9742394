//! CSS Selectors
//!
//! The selector subset the page behaviors depend on: selector lists,
//! descendant and child combinators, and compound selectors built from
//! type, universal, id, class and attribute parts.

use crate::{DomTree, ElementData, NodeId};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at offset {offset} in {input:?}")]
    UnexpectedChar { ch: char, offset: usize, input: String },

    #[error("unterminated attribute selector in {input:?}")]
    UnterminatedAttribute { input: String },

    #[error("dangling combinator in {input:?}")]
    DanglingCombinator { input: String },
}

/// A parsed selector list (`a, b, c`)
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    alternatives: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators, stored left to right
#[derive(Debug, Clone, PartialEq)]
struct ComplexSelector {
    compounds: Vec<Vec<SimpleSelector>>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };
        match matcher {
            AttributeMatcher::Exact(expected) => val == expected,
            AttributeMatcher::Contains(expected) => val.split_whitespace().any(|w| w == expected),
            AttributeMatcher::DashMatch(expected) => {
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(expected.as_str()),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(expected.as_str()),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(expected.as_str()),
        }
    }
}

impl SimpleSelector {
    fn matches(&self, el: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Type(tag) => el.tag == *tag,
            Self::Id(id) => el.id() == Some(id.as_str()),
            Self::Class(class) => el.class_list().contains(class),
            Self::Attribute(attr) => attr.matches(el.get_attr(&attr.name)),
        }
    }
}

impl Selector {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in split_list(input) {
            alternatives.push(parse_complex(part, input)?);
        }
        if alternatives.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { alternatives })
    }

    /// Check if the node is an element matching any alternative
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        tree.element(id).is_some_and(|el| {
            self.alternatives
                .iter()
                .any(|complex| complex.matches(tree, id, el))
        })
    }
}

impl ComplexSelector {
    fn matches(&self, tree: &DomTree, id: NodeId, el: &ElementData) -> bool {
        let last = self.compounds.len() - 1;
        compound_matches(&self.compounds[last], el) && self.match_left(tree, id, last)
    }

    /// Match compounds left of `idx`, given `id` matched `compounds[idx]`
    fn match_left(&self, tree: &DomTree, id: NodeId, idx: usize) -> bool {
        if idx == 0 {
            return true;
        }
        let left = &self.compounds[idx - 1];
        match self.combinators[idx - 1] {
            Combinator::Child => tree.parent_element(id).is_some_and(|parent| {
                tree.element(parent)
                    .is_some_and(|el| compound_matches(left, el))
                    && self.match_left(tree, parent, idx - 1)
            }),
            Combinator::Descendant => tree.ancestors(id).any(|ancestor| {
                tree.element(ancestor)
                    .is_some_and(|el| compound_matches(left, el))
                    && self.match_left(tree, ancestor, idx - 1)
            }),
        }
    }
}

fn compound_matches(compound: &[SimpleSelector], el: &ElementData) -> bool {
    compound.iter().all(|s| s.matches(el))
}

/// Split on commas outside brackets and quotes
fn split_list(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_complex(part: &str, input: &str) -> Result<ComplexSelector, SelectorError> {
    let mut compounds: Vec<Vec<SimpleSelector>> = Vec::new();
    let mut combinators = Vec::new();
    let mut current: Vec<SimpleSelector> = Vec::new();
    let mut pending: Option<Combinator> = None;

    let unexpected = |ch: char, offset: usize| SelectorError::UnexpectedChar {
        ch,
        offset,
        input: input.to_string(),
    };

    let chars: Vec<(usize, char)> = part.char_indices().collect();
    let mut i = 0;
    while i < chars.len() {
        let (offset, c) = chars[i];

        if c.is_whitespace() || c == '>' {
            if !current.is_empty() {
                compounds.push(std::mem::take(&mut current));
                pending = Some(Combinator::Descendant);
            }
            if c == '>' {
                if compounds.is_empty() || pending.is_none() {
                    return Err(unexpected(c, offset));
                }
                pending = Some(Combinator::Child);
            }
            i += 1;
            continue;
        }

        if let Some(comb) = pending.take() {
            combinators.push(comb);
        }

        match c {
            '*' => {
                current.push(SimpleSelector::Universal);
                i += 1;
            }
            '#' | '.' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && is_ident_char(chars[end].1) {
                    end += 1;
                }
                if end == start {
                    return Err(unexpected(c, offset));
                }
                let name: String = chars[start..end].iter().map(|&(_, ch)| ch).collect();
                current.push(if c == '#' {
                    SimpleSelector::Id(name)
                } else {
                    SimpleSelector::Class(name)
                });
                i = end;
            }
            '[' => {
                let mut end = i + 1;
                let mut quote: Option<char> = None;
                while end < chars.len() {
                    let ch = chars[end].1;
                    match quote {
                        Some(q) if ch == q => quote = None,
                        Some(_) => {}
                        None if ch == '"' || ch == '\'' => quote = Some(ch),
                        None if ch == ']' => break,
                        None => {}
                    }
                    end += 1;
                }
                if end >= chars.len() {
                    return Err(SelectorError::UnterminatedAttribute {
                        input: input.to_string(),
                    });
                }
                let content: String = chars[i + 1..end].iter().map(|&(_, ch)| ch).collect();
                current.push(parse_attribute_selector(&content).ok_or_else(|| unexpected(c, offset))?);
                i = end + 1;
            }
            c if is_ident_char(c) => {
                let start = i;
                let mut end = start;
                while end < chars.len() && is_ident_char(chars[end].1) {
                    end += 1;
                }
                let name: String = chars[start..end].iter().map(|&(_, ch)| ch).collect();
                current.push(SimpleSelector::Type(name.to_ascii_lowercase()));
                i = end;
            }
            other => return Err(unexpected(other, offset)),
        }
    }

    if !current.is_empty() {
        compounds.push(current);
    } else if matches!(pending, Some(Combinator::Child)) {
        return Err(SelectorError::DanglingCombinator {
            input: input.to_string(),
        });
    }

    if compounds.is_empty() {
        return Err(SelectorError::Empty);
    }

    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

/// Parse an attribute selector content (without brackets)
fn parse_attribute_selector(content: &str) -> Option<SimpleSelector> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    for (op, matcher_fn) in [
        ("~=", AttributeMatcher::Contains as fn(String) -> AttributeMatcher),
        ("|=", AttributeMatcher::DashMatch as fn(String) -> AttributeMatcher),
        ("^=", AttributeMatcher::Prefix as fn(String) -> AttributeMatcher),
        ("$=", AttributeMatcher::Suffix as fn(String) -> AttributeMatcher),
        ("*=", AttributeMatcher::Substring as fn(String) -> AttributeMatcher),
        ("=", AttributeMatcher::Exact as fn(String) -> AttributeMatcher),
    ] {
        if let Some(pos) = content.find(op) {
            let name = content[..pos].trim();
            if name.is_empty() || !name.chars().all(is_ident_char) {
                return None;
            }
            let raw = content[pos + op.len()..].trim();
            let value = strip_quotes(raw);
            return Some(SimpleSelector::Attribute(AttributeSelector {
                name: name.to_ascii_lowercase(),
                matcher: Some(matcher_fn(value.to_string())),
            }));
        }
    }

    if !content.chars().all(is_ident_char) {
        return None;
    }
    Some(SimpleSelector::Attribute(AttributeSelector {
        name: content.to_ascii_lowercase(),
        matcher: None,
    }))
}

fn strip_quotes(raw: &str) -> &str {
    for q in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(q) && raw.ends_with(q) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let section = tree.create_element("section");
        tree.set_attribute(section, "id", "pricing");
        let card = tree.create_element("div");
        tree.set_attribute(card, "class", "card");
        let price = tree.create_element("span");
        tree.set_attribute(price, "class", "price featured");
        tree.set_attribute(price, "data-plan", "pro");
        tree.append_child(tree.root(), section);
        tree.append_child(section, card);
        tree.append_child(card, price);
        (tree, section, card, price)
    }

    #[test]
    fn test_descendant_combinator() {
        let (tree, _section, _card, price) = page();
        let sel = Selector::parse("#pricing .price").unwrap();
        assert!(sel.matches(&tree, price));
    }

    #[test]
    fn test_child_combinator() {
        let (tree, _section, card, price) = page();
        assert!(Selector::parse(".card > span").unwrap().matches(&tree, price));
        assert!(!Selector::parse("#pricing > span").unwrap().matches(&tree, price));
        assert!(Selector::parse("#pricing>div").unwrap().matches(&tree, card));
    }

    #[test]
    fn test_attribute_quoted_value() {
        let (tree, _s, _c, price) = page();
        assert!(Selector::parse("[data-plan='pro']").unwrap().matches(&tree, price));
        assert!(Selector::parse("[data-plan=\"pro\"]").unwrap().matches(&tree, price));
        assert!(Selector::parse("[data-plan=pro]").unwrap().matches(&tree, price));
        assert!(!Selector::parse("[data-plan='basic']").unwrap().matches(&tree, price));
        assert!(Selector::parse("[data-plan]").unwrap().matches(&tree, price));
    }

    #[test]
    fn test_selector_list() {
        let (tree, section, _c, price) = page();
        let sel = Selector::parse("span, section").unwrap();
        assert!(sel.matches(&tree, price));
        assert!(sel.matches(&tree, section));
    }

    #[test]
    fn test_compound() {
        let (tree, _s, _c, price) = page();
        assert!(Selector::parse("span.price.featured").unwrap().matches(&tree, price));
        assert!(!Selector::parse("div.price").unwrap().matches(&tree, price));
    }

    #[test]
    fn test_comma_inside_attribute_value() {
        let sel = Selector::parse("[data-payload='a,b']").unwrap();
        assert_eq!(sel.alternatives.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("  , "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("[data-track"),
            Err(SelectorError::UnterminatedAttribute { .. })
        ));
        assert!(matches!(
            Selector::parse("div >"),
            Err(SelectorError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            Selector::parse("a:hover"),
            Err(SelectorError::UnexpectedChar { ch: ':', .. })
        ));
    }

    #[test]
    fn test_query_document_order() {
        let (tree, _section, card, price) = page();
        let sel = Selector::parse("span, div").unwrap();
        assert_eq!(tree.query_selector_all(tree.root(), &sel), vec![card, price]);
        assert_eq!(tree.query_selector(card, &sel), Some(price));
    }
}
