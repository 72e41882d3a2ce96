//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::MockIdentityProvider;
use crate::domain::{ErrorCode, InstitutionalEmail, UNSPECIFIED_SERVICE_MESSAGE, VerificationCode};

#[fixture]
fn registration() -> Registration {
    let email = InstitutionalEmail::new("ada@spelman.edu").expect("allowed domain");
    Registration::new("Ada", email, "hunter22")
}

#[fixture]
fn credentials() -> LoginCredentials {
    LoginCredentials::try_from_parts("ada@spelman.edu", "hunter22").expect("credentials shape")
}

#[fixture]
fn verification() -> SignupVerification {
    SignupVerification {
        email: "ada@spelman.edu".to_owned(),
        code: VerificationCode::new("123456").expect("six digits"),
    }
}

fn user() -> IdentityUser {
    IdentityUser {
        id: "user-1".to_owned(),
        email: "ada@spelman.edu".to_owned(),
        user_metadata: json!({ "name": "Ada" }),
        email_confirmed_at: None,
        created_at: None,
    }
}

#[rstest]
#[tokio::test]
async fn register_signs_up_once_with_name_metadata(registration: Registration) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_up()
        .withf(|r| r.name() == "Ada" && r.email().as_ref() == "ada@spelman.edu")
        .times(1)
        .return_once(|_| Ok(()));

    let service = AccountService::new(Arc::new(identity));
    service
        .register(registration)
        .await
        .expect("registration succeeds");
}

#[rstest]
#[case("User already registered", "User already registered")]
#[case("  ", UNSPECIFIED_SERVICE_MESSAGE)]
#[tokio::test]
async fn register_passes_collaborator_message_through(
    registration: Registration,
    #[case] reason: &'static str,
    #[case] expected: &str,
) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_up()
        .times(1)
        .return_once(move |_| Err(IdentityProviderError::rejected(reason)));

    let service = AccountService::new(Arc::new(identity));
    let err = service
        .register(registration)
        .await
        .expect_err("sign-up rejected");

    assert_eq!(err.code(), ErrorCode::ServiceError);
    assert_eq!(err.message(), expected);
}

#[rstest]
#[tokio::test]
async fn login_returns_collaborator_user(credentials: LoginCredentials) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_in_with_password()
        .withf(|c| c.email() == "ada@spelman.edu" && c.password() == "hunter22")
        .times(1)
        .return_once(|_| Ok(user()));

    let service = AccountService::new(Arc::new(identity));
    let logged_in = service.login(credentials).await.expect("login succeeds");
    assert_eq!(logged_in, user());
}

#[rstest]
#[case(IdentityProviderError::rejected("Invalid login credentials"))]
#[case(IdentityProviderError::rejected("Email not confirmed"))]
#[case(IdentityProviderError::transport("connection refused"))]
#[case(IdentityProviderError::decode("missing user"))]
#[tokio::test]
async fn login_failures_are_indistinguishable(
    credentials: LoginCredentials,
    #[case] failure: IdentityProviderError,
) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_in_with_password()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = AccountService::new(Arc::new(identity));
    let err = service.login(credentials).await.expect_err("login fails");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn verify_succeeds_when_code_is_accepted(verification: SignupVerification) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_verify_signup_code()
        .withf(|v| v.email == "ada@spelman.edu" && v.code.expose() == "123456")
        .times(1)
        .return_once(|_| Ok(()));

    let service = AccountService::new(Arc::new(identity));
    service.verify(verification).await.expect("verification succeeds");
}

#[rstest]
#[case(
    IdentityProviderError::rejected("Token has expired or is invalid"),
    ErrorCode::InvalidRequest,
    INVALID_VERIFICATION_CODE_MESSAGE
)]
#[case(
    IdentityProviderError::transport("timeout"),
    ErrorCode::ServiceError,
    "Error verifying email"
)]
#[tokio::test]
async fn verify_maps_failures(
    verification: SignupVerification,
    #[case] failure: IdentityProviderError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_verify_signup_code()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = AccountService::new(Arc::new(identity));
    let err = service.verify(verification).await.expect_err("verification fails");

    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
}
