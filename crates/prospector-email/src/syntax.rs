//! Structural email address check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Local part of `[A-Za-z0-9._%+-]`, host of `[A-Za-z0-9.-]`, and a final
/// alphabetic label of at least two characters.
static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Email format regex is hardcoded and valid")
});

/// Whether `address` is structurally a plausible email address.
#[must_use]
pub fn is_valid_format(address: &str) -> bool {
    EMAIL_FORMAT.is_match(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_format("a.b@example.com"));
        assert!(is_valid_format("ada_lovelace@example.co.uk"));
        assert!(is_valid_format("first+tag%x@mail-01.example.io"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_format("not-an-email"));
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("@example.com"));
        assert!(!is_valid_format("ada@example"));
        assert!(!is_valid_format("ada@example.c"));
        assert!(!is_valid_format("ada@example.c0m"));
        assert!(!is_valid_format("ada lovelace@example.com"));
        assert!(!is_valid_format("a@b@example.com"));
    }

    #[test]
    fn test_rejects_trailing_newline() {
        assert!(!is_valid_format("ada@example.com\n"));
    }
}
