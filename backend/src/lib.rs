//! Campus notes backend library.
//!
//! Hexagonal layout: `domain` holds the services and ports, `inbound` the
//! actix-web adapter, `outbound` the Supabase and Tesseract adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
