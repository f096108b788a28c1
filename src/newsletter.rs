//! Newsletter
//!
//! Address validation for the newsletter sign-up form. Submitting is simulated by the view layer;
//! only the address check lives here.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Something, an `@`, something, a dot, something; no whitespace anywhere.
#[expect(clippy::expect_used, reason = "Constant pattern")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Newsletter errors
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// The address does not look like an email address.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

/// A trimmed, syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a newsletter email address.
///
/// # Errors
///
/// Returns [`NewsletterError::InvalidEmail`] if the trimmed input does not match the address pattern.
pub fn validate_email(raw: &str) -> Result<EmailAddress, NewsletterError> {
    let trimmed = raw.trim();
    if EMAIL_RE.is_match(trimmed) {
        Ok(EmailAddress(trimmed.to_string()))
    } else {
        Err(NewsletterError::InvalidEmail(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_plain_addresses() -> TestResult {
        let email = validate_email("  hello@2go.example  ")?;

        assert_eq!(email.as_str(), "hello@2go.example");

        Ok(())
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "hello", "hello@", "hello@example", "he llo@example.com", "a@b@c.d"] {
            assert!(
                matches!(validate_email(raw), Err(NewsletterError::InvalidEmail(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
