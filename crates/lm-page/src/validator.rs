//! Contact Validator
//!
//! A contact string is valid when it looks like an email address, a phone
//! number, or a messaging handle. Which kind matched is not reported.

use regex::Regex;
use std::sync::LazyLock;

// Letter classes are spelled out: case folding would let non-ASCII letters
// such as the Kelvin sign through.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

// ASCII digits only; `\d` would also accept other Unicode digit classes.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9][0-9\s-]{6,}$").expect("phone pattern compiles"));

static HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][-_a-zA-Z0-9]{5,19}$").expect("handle pattern compiles")
});

/// Check a contact string (trimmed before matching)
pub fn is_valid_contact(value: &str) -> bool {
    let value = value.trim();
    EMAIL.is_match(value) || PHONE.is_match(value) || HANDLE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert!(is_valid_contact("a@b.co"));
        assert!(is_valid_contact("+1 555-123-4567"));
        assert!(is_valid_contact("john_doe1"));
        assert!(!is_valid_contact("bad"));
        assert!(!is_valid_contact(""));
    }

    #[test]
    fn test_email_case_insensitive() {
        assert!(is_valid_contact("Sales@LianMai.CN"));
        assert!(!is_valid_contact("sales@lianmai"));
        assert!(!is_valid_contact("sales@lianmai.c"));
    }

    #[test]
    fn test_email_rejects_non_ascii_letters() {
        assert!(!is_valid_contact("\u{212A}@b.co"));
        assert!(!is_valid_contact("a@b.\u{212A}o"));
        assert!(is_valid_contact("K@B.CO"));
    }

    #[test]
    fn test_phone_lengths() {
        assert!(is_valid_contact("1380013"));
        assert!(!is_valid_contact("138001"));
        assert!(is_valid_contact("  13800138000  "));
        assert!(!is_valid_contact("+86 (10) 1234"));
    }

    #[test]
    fn test_handle_bounds() {
        assert!(is_valid_contact("wx_abc"));
        assert!(!is_valid_contact("wx_ab"));
        assert!(is_valid_contact("a1234567890123456789"));
        assert!(!is_valid_contact("a12345678901234567890"));
        assert!(!is_valid_contact("1wechat"));
    }
}
