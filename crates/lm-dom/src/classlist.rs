//! DOMTokenList (classList)
//!
//! Space-separated token set backing an element's `class` attribute.

/// DOMTokenList for managing space-separated tokens (e.g., classList)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token, returns true if the list changed
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token, returns true if the list changed
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        before != self.tokens.len()
    }

    /// Toggle token, returns new state
    ///
    /// With `force` set the token is added (`Some(true)`) or removed
    /// (`Some(false)`) unconditionally.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(on) => on,
            None => !self.contains(token),
        };
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
        present
    }

    /// Value as the `class` attribute string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_dedupes() {
        let list = DOMTokenList::from_string("hero  hidden hero");
        assert_eq!(list.len(), 2);
        assert_eq!(list.value(), "hero hidden");
    }

    #[test]
    fn test_toggle_force() {
        let mut list = DOMTokenList::from_string("tab");

        assert!(list.toggle("active", Some(true)));
        assert!(list.toggle("active", Some(true)));
        assert_eq!(list.value(), "tab active");

        assert!(!list.toggle("active", Some(false)));
        assert!(!list.contains("active"));
    }

    #[test]
    fn test_toggle_flip() {
        let mut list = DOMTokenList::new();
        assert!(list.toggle("open", None));
        assert!(!list.toggle("open", None));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_remove_report_change() {
        let mut list = DOMTokenList::new();
        assert!(list.add("show"));
        assert!(!list.add("show"));
        assert!(list.remove("show"));
        assert!(!list.remove("show"));
    }
}
