//! Driven port for the external identity collaborator.
//!
//! The collaborator owns credentials: it creates accounts, checks passwords
//! and consumes the one-time codes it mails after sign-up. This service never
//! stores or compares passwords itself.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{IdentityUser, LoginCredentials, Registration, SignupVerification};

use super::define_port_error;

define_port_error! {
    /// Failures reported by identity adapters.
    pub enum IdentityProviderError {
        /// The collaborator answered and refused the request.
        Rejected { message: String } => "{message}",
        /// The collaborator could not be reached.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// The collaborator answered with a payload we could not read.
        Decode { message: String } => "identity provider response malformed: {message}",
    }
}

/// Port for account lifecycle calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account, attaching the display name as profile metadata.
    async fn sign_up(&self, registration: &Registration) -> Result<(), IdentityProviderError>;

    /// Check a password and return the collaborator's user object.
    async fn sign_in_with_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError>;

    /// Consume a sign-up verification code.
    async fn verify_signup_code(
        &self,
        verification: &SignupVerification,
    ) -> Result<(), IdentityProviderError>;
}

/// Identity provider used when no collaborator is configured.
///
/// Every sign-up and code succeeds, and any non-empty credentials log in as
/// an already confirmed user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

/// Identifier returned for every fixture login.
pub const FIXTURE_USER_ID: &str = "00000000-0000-4000-8000-000000000001";

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_up(&self, _registration: &Registration) -> Result<(), IdentityProviderError> {
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError> {
        Ok(IdentityUser {
            id: FIXTURE_USER_ID.to_owned(),
            email: credentials.email().to_owned(),
            user_metadata: json!({}),
            email_confirmed_at: None,
            created_at: None,
        })
    }

    async fn verify_signup_code(
        &self,
        _verification: &SignupVerification,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}
