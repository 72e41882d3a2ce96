//! GoTrue-backed identity provider.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityUser, LoginCredentials, Registration, SignupVerification};

use super::dto::{PasswordGrantDto, SessionDto, SignUpBodyDto, VerifyOtpDto};
use super::{Failure, SupabaseClient, send};

const OTP_TYPE_SIGNUP: &str = "signup";

/// Identity provider calling the Supabase auth API with the service key.
#[derive(Debug, Clone)]
pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    /// Wrap a configured client.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn map_failure(failure: Failure) -> IdentityProviderError {
    match failure {
        Failure::Rejected(message) => IdentityProviderError::rejected(message),
        Failure::Unavailable(message) => IdentityProviderError::transport(message),
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(&self, registration: &Registration) -> Result<(), IdentityProviderError> {
        let request = self
            .client
            .request(Method::POST, &["auth", "v1", "signup"])
            .json(&SignUpBodyDto::from(registration));
        send(request).await.map_err(map_failure)?;
        debug!(email = %registration.email(), "sign-up accepted by identity provider");
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError> {
        let request = self
            .client
            .request(Method::POST, &["auth", "v1", "token"])
            .query(&[("grant_type", "password")])
            .json(&PasswordGrantDto {
                email: credentials.email(),
                password: credentials.password(),
            });
        let body = send(request).await.map_err(map_failure)?;
        let session: SessionDto = serde_json::from_slice(&body)
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(session.user)
    }

    async fn verify_signup_code(
        &self,
        verification: &SignupVerification,
    ) -> Result<(), IdentityProviderError> {
        let request = self
            .client
            .request(Method::POST, &["auth", "v1", "verify"])
            .json(&VerifyOtpDto {
                kind: OTP_TYPE_SIGNUP,
                email: &verification.email,
                token: verification.code.expose(),
            });
        send(request).await.map_err(map_failure)?;
        Ok(())
    }
}
