//! Supabase REST adapters.
//!
//! One shared [`SupabaseClient`] carries the project URL, the service-role
//! credentials and a reqwest client with a request timeout. The adapters built
//! on it implement the identity, storage and catalog ports:
//!
//! - [`SupabaseIdentityProvider`]: GoTrue sign-up, password grant and OTP
//!   verification.
//! - [`SupabaseObjectStorage`]: Storage uploads and public URLs.
//! - [`PostgrestNoteRepository`]: PostgREST inserts and filtered reads.

mod auth;
mod catalog;
mod dto;
mod storage;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use thiserror::Error;

pub use auth::SupabaseIdentityProvider;
pub use catalog::PostgrestNoteRepository;
pub use storage::SupabaseObjectStorage;

/// Storage bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "notes";
/// Catalog table used when none is configured.
pub const DEFAULT_NOTES_TABLE: &str = "notes";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building a [`SupabaseClient`].
#[derive(Debug, Error)]
pub enum SupabaseClientError {
    /// The project URL cannot have path segments appended.
    #[error("Supabase URL `{0}` is not a base URL")]
    NotABaseUrl(String),
    /// The service-role key contains bytes not allowed in an HTTP header.
    #[error("Supabase service key is not a valid header value")]
    InvalidServiceKey,
    /// reqwest refused the client configuration.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Authenticated HTTP client for one Supabase project.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Build a client that sends `service_key` as both `apikey` and bearer
    /// token on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot serve as a base, the key is not a
    /// valid header value, or reqwest cannot build the client.
    pub fn new(
        base_url: Url,
        service_key: &str,
        timeout: Duration,
    ) -> Result<Self, SupabaseClientError> {
        if base_url.cannot_be_a_base() {
            return Err(SupabaseClientError::NotABaseUrl(base_url.to_string()));
        }

        let mut apikey =
            HeaderValue::from_str(service_key).map_err(|_| SupabaseClientError::InvalidServiceKey)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {service_key}"))
            .map_err(|_| SupabaseClientError::InvalidServiceKey)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Project URL with `segments` appended, each percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }
}

/// Reason a collaborator call did not succeed.
#[derive(Debug)]
pub(crate) enum Failure {
    /// 4xx: the collaborator refused the request.
    Rejected(String),
    /// 5xx or transport failure.
    Unavailable(String),
}

/// Send a request and return the body of a 2xx response.
///
/// Non-2xx responses are reduced to the collaborator's own message, never the
/// raw payload.
pub(crate) async fn send(request: RequestBuilder) -> Result<Vec<u8>, Failure> {
    let response = request
        .send()
        .await
        .map_err(|err| Failure::Unavailable(transport_message(&err)))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| Failure::Unavailable(transport_message(&err)))?;
    if status.is_success() {
        return Ok(body.to_vec());
    }

    let message = dto::error_message(&body).unwrap_or_else(|| fallback_message(status));
    if status.is_client_error() {
        Err(Failure::Rejected(message))
    } else {
        Err(Failure::Unavailable(message))
    }
}

fn transport_message(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_owned()
    } else if error.is_connect() {
        "connection failed".to_owned()
    } else {
        error.to_string()
    }
}

fn fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => format!("status {}", status.as_u16()),
    }
}
