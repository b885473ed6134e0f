// ABOUTME: Loose email shape check used before requesting OTPs and reset links

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Trimmed value must look like local@domain.tld
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ops+alerts@clinic.co.ng "));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for value in ["", "ada", "ada@", "ada@example", "a da@example.com", "@example.com", "ada@@x.com"] {
            assert!(!is_valid_email(value), "{value:?} should be rejected");
        }
    }
}
