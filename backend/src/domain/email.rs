//! Institutional email addresses accepted for registration.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Domains whose addresses may register.
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["spelman.edu", "morehouse.edu"];

/// Validation errors returned by [`InstitutionalEmail::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// No address was supplied.
    Missing,
    /// The address does not end with an allowed `@domain`.
    DisallowedDomain,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing | Self::DisallowedDomain => {
                f.write_str("Email must end with @spelman.edu or @morehouse.edu.")
            }
        }
    }
}

impl std::error::Error for EmailValidationError {}

static INSTITUTIONAL_EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn institutional_email_regex() -> &'static Regex {
    INSTITUTIONAL_EMAIL_RE.get_or_init(|| {
        let domains = ALLOWED_EMAIL_DOMAINS
            .iter()
            .map(|domain| regex::escape(domain))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!("@({domains})$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("institutional email regex failed to compile: {error}"))
    })
}

/// Email address whose domain is on the institutional allow-list.
///
/// ## Invariants
/// - The address ends with `@` immediately followed by one of
///   [`ALLOWED_EMAIL_DOMAINS`]. Matching is case-sensitive and subdomains are
///   rejected.
///
/// # Examples
/// ```
/// use backend::domain::InstitutionalEmail;
///
/// assert!(InstitutionalEmail::new("ada@spelman.edu").is_ok());
/// assert!(InstitutionalEmail::new("ada@gmail.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionalEmail(String);

impl InstitutionalEmail {
    /// Validate and construct an address.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(EmailValidationError::Missing);
        }
        if !institutional_email_regex().is_match(&email) {
            return Err(EmailValidationError::DisallowedDomain);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for InstitutionalEmail {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InstitutionalEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
