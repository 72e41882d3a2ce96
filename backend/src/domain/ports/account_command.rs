//! Driving port for account registration, login and verification.
//!
//! Inbound adapters call this port with already validated domain values; the
//! implementation decides how collaborator failures surface to clients.

use async_trait::async_trait;

use crate::domain::{Error, IdentityUser, LoginCredentials, Registration, SignupVerification};

/// Domain use-case port for account lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account for an institutional address.
    async fn register(&self, registration: Registration) -> Result<(), Error>;

    /// Authenticate and return the collaborator's user object.
    async fn login(&self, credentials: LoginCredentials) -> Result<IdentityUser, Error>;

    /// Confirm an address with the code mailed at sign-up.
    async fn verify(&self, verification: SignupVerification) -> Result<(), Error>;
}
