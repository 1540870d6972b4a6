//! Field-level input validation shared by the admin and public workflows.
//!
//! Collects every failing field instead of stopping at the first one so
//! forms can highlight all problems at once.

use common::types::FieldErrors;

use crate::errors::ServiceError;

#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self { Self::default() }

    /// Record `message` for `field` unless `ok`.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.entry(field.to_string()).or_default().push(message.to_string());
        }
        self
    }

    /// Character-count bounds, inclusive.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize, too_short: &str, too_long: &str) -> &mut Self {
        let n = value.chars().count();
        self.check(field, n >= min, too_short);
        self.check(field, n <= max, too_long)
    }

    pub fn max_length(&mut self, field: &str, value: &str, max: usize, message: &str) -> &mut Self {
        self.check(field, value.chars().count() <= max, message)
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, is_email(value), "Please enter a valid email address");
        self.max_length(field, value, 255, "Email must be less than 255 characters")
    }

    pub fn is_empty(&self) -> bool { self.errors.is_empty() }

    pub fn finish(self) -> Result<(), ServiceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::InvalidFields(self.errors))
        }
    }
}

/// Loose address check: one `@`, nonempty local part, dotted domain, no spaces.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else { return false };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Digits, parentheses, hyphens, plus signs and whitespace only.
pub fn is_phone(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '-' | '+') || c.is_whitespace())
}

/// Absolute http(s) URL with a host.
pub fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Treat `Some("")` (and whitespace-only) like an omitted optional field.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_failing_fields() {
        let mut v = Validator::new();
        v.length("name", "", 1, 100, "Name is required", "Name too long")
            .email("email", "nope")
            .check("ok", true, "never");
        let err = v.finish().unwrap_err();
        match err {
            ServiceError::InvalidFields(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map["name"], vec!["Name is required".to_string()]);
                assert_eq!(map["email"], vec!["Please enter a valid email address".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("info@hometownservices.net"));
        assert!(!is_email("info@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@@example.com"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_phone("(555) 123-4567"));
        assert!(is_phone("+1 555 123 4567"));
        assert!(is_phone(""));
        assert!(!is_phone("555-CALL-NOW"));
    }

    #[test]
    fn url_shapes() {
        assert!(is_url("https://cdn.example.com/roof.jpg"));
        assert!(is_url("http://example.com"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("https://"));
        assert!(!is_url("roof.jpg"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some(" x ".into())), Some("x".into()));
        assert_eq!(blank_to_none(None), None);
    }
}
