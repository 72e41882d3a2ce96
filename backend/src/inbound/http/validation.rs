//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Machine-readable reason attached to validation error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    DisallowedDomain,
    InvalidVerificationCode,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::DisallowedDomain => "disallowed_domain",
            Self::InvalidVerificationCode => "invalid_verification_code",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

/// Build an invalid-request error pointing at `field`.
pub(crate) fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "code": code.as_str(),
    }))
}

/// JSON extractor configuration rendering body errors in the shared envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON body");
        Error::invalid_request("Request body must be valid JSON")
            .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Query extractor configuration rendering query errors in the shared
/// envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request("Query string is malformed")
            .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
            .into()
    })
}
