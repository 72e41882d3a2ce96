//! Authentication primitives: registrations, login credentials, verification
//! codes and the identity collaborator's user view.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use super::InstitutionalEmail;

/// Validated sign-up request forwarded to the identity collaborator.
///
/// ## Invariants
/// - `email` is on the institutional allow-list.
/// - `password` is opaque to this service and kept in zeroizing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: InstitutionalEmail,
    password: Zeroizing<String>,
}

impl Registration {
    /// Bundle validated registration parts.
    pub fn new(name: impl Into<String>, email: InstitutionalEmail, password: &str) -> Self {
        Self {
            name: name.into(),
            email,
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Display name stored as profile metadata.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Institutional address used as the account identifier.
    pub fn email(&self) -> &InstitutionalEmail {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming. The domain is
///   not checked here: unknown addresses fail at the identity collaborator
///   exactly like wrong passwords do.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@spelman.edu ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@spelman.edu");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Length of the one-time sign-up verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Validation errors for [`VerificationCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationCodeError {
    /// The code is not exactly six ASCII digits.
    Malformed,
}

impl fmt::Display for VerificationCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(
                f,
                "verification code must be {VERIFICATION_CODE_LEN} digits"
            ),
        }
    }
}

impl std::error::Error for VerificationCodeError {}

/// One-time code mailed to the user after sign-up.
///
/// The value is secret until consumed and is never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(Zeroizing<String>);

impl VerificationCode {
    /// Validate a six digit code; surrounding whitespace is ignored.
    pub fn new(code: &str) -> Result<Self, VerificationCodeError> {
        let trimmed = code.trim();
        if trimmed.len() != VERIFICATION_CODE_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(VerificationCodeError::Malformed);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Expose the code for transmission to the identity collaborator.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

/// Email plus code pair confirming a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupVerification {
    /// Address the code was sent to, trimmed.
    pub email: String,
    /// Six digit code from the confirmation email.
    pub code: VerificationCode,
}

/// User object returned by the identity collaborator after a login.
///
/// Field names follow the collaborator's snake_case contract because the
/// object is relayed to clients unchanged in shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Collaborator-assigned user identifier.
    pub id: String,
    /// Account email address.
    pub email: String,
    /// Profile metadata captured at sign-up (for example `name`).
    #[serde(default)]
    pub user_metadata: Value,
    /// When the address was confirmed, if it has been.
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
