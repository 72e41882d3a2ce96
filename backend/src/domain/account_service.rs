//! Account lifecycle service.
//!
//! Implements [`AccountCommand`] over an [`IdentityProvider`]. Login failures
//! are deliberately indistinguishable to clients; the underlying reason is
//! only logged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{AccountCommand, IdentityProvider, IdentityProviderError};
use crate::domain::{Error, IdentityUser, LoginCredentials, Registration, SignupVerification};

/// Message returned for every failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Message returned when a verification code is malformed or refused.
pub const INVALID_VERIFICATION_CODE_MESSAGE: &str = "Invalid verification code.";

/// Account service implementing [`AccountCommand`].
pub struct AccountService<P: ?Sized> {
    identity: Arc<P>,
}

impl<P: ?Sized> Clone for AccountService<P> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<P: ?Sized> AccountService<P> {
    /// Create a service backed by `identity`.
    pub fn new(identity: Arc<P>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<P> AccountCommand for AccountService<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn register(&self, registration: Registration) -> Result<(), Error> {
        self.identity
            .sign_up(&registration)
            .await
            .map_err(|err| {
                error!(email = %registration.email(), error = %err, "sign-up failed");
                Error::from_collaborator(err.to_string())
            })?;
        info!(email = %registration.email(), "account registered");
        Ok(())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<IdentityUser, Error> {
        match self.identity.sign_in_with_password(&credentials).await {
            Ok(user) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user)
            }
            Err(err) => {
                warn!(email = credentials.email(), error = %err, "login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }

    async fn verify(&self, verification: SignupVerification) -> Result<(), Error> {
        match self.identity.verify_signup_code(&verification).await {
            Ok(()) => {
                info!(email = %verification.email, "email verified");
                Ok(())
            }
            Err(IdentityProviderError::Rejected { message }) => {
                warn!(email = %verification.email, reason = %message, "verification code refused");
                Err(Error::invalid_request(INVALID_VERIFICATION_CODE_MESSAGE))
            }
            Err(err) => {
                error!(email = %verification.email, error = %err, "verification call failed");
                Err(Error::service("Error verifying email"))
            }
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
