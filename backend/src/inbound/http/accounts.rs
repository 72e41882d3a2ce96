//! Account HTTP handlers.
//!
//! ```text
//! POST /register {"name":"Ada","email":"ada@spelman.edu","password":"..."}
//! POST /login    {"email":"ada@spelman.edu","password":"..."}
//! POST /verify   {"email":"ada@spelman.edu","verificationCode":"123456"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, IdentityUser, INVALID_CREDENTIALS_MESSAGE, INVALID_VERIFICATION_CODE_MESSAGE,
    InstitutionalEmail, LoginCredentials, Registration, SignupVerification, VerificationCode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, IdentityUserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ValidationCode, field_error};

/// Request body for `POST /register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@spelman.edu")]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /login`.
///
/// Absent, null and non-string fields all read as empty, so every malformed
/// login ends in the same unauthorised response.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "ada@spelman.edu")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Parse a raw body, treating anything that is not a JSON object of
    /// strings as empty credentials.
    fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|err| {
            debug!(error = %err, "login body is not a credentials object");
            Self::default()
        })
    }
}

/// Request body for `POST /verify`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyRequest {
    #[schema(example = "ada@spelman.edu")]
    pub email: String,
    #[schema(example = "123456")]
    pub verification_code: String,
}

/// Success envelope carrying only a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
        }
    }
}

/// Success envelope for `POST /login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = IdentityUserSchema)]
    pub user: IdentityUser,
}

/// Register a new account for an institutional address.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration accepted", body = MessageResponse),
        (status = 400, description = "Email outside the allowed domains", body = ErrorSchema),
        (status = 500, description = "Identity service error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let email = InstitutionalEmail::new(email).map_err(|err| {
        field_error(
            FieldName::new("email"),
            ValidationCode::DisallowedDomain,
            err.to_string(),
        )
    })?;

    state
        .accounts
        .register(Registration::new(name, email, &password))
        .await?;

    Ok(web::Json(MessageResponse::ok(
        "Registration successful. Check your email for verification.",
    )))
}

/// Exchange email and password for the identity service's user object.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = LoginRequest::from_body(&body);
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))?;

    let user = state.accounts.login(credentials).await?;

    Ok(web::Json(LoginResponse {
        success: true,
        message: "Login successful".to_owned(),
        user,
    }))
}

/// Confirm an address with the six digit code sent at sign-up.
#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid verification code", body = ErrorSchema),
        (status = 500, description = "Identity service error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "verifyEmail"
)]
#[post("/verify")]
pub async fn verify(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let VerifyRequest {
        email,
        verification_code,
    } = payload.into_inner();
    let code = VerificationCode::new(&verification_code).map_err(|_| {
        field_error(
            FieldName::new("verificationCode"),
            ValidationCode::InvalidVerificationCode,
            INVALID_VERIFICATION_CODE_MESSAGE,
        )
    })?;

    state
        .accounts
        .verify(SignupVerification {
            email: email.trim().to_owned(),
            code,
        })
        .await?;

    Ok(web::Json(MessageResponse::ok("Email verified successfully")))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
