//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their shape for utoipa and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request failed validation before any collaborator was called.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Credentials were rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// A collaborator failed; the message comes from the collaborator.
    #[schema(rename = "service_error")]
    ServiceError,
    /// An unexpected failure inside this service.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false` for error payloads.
    #[schema(example = false)]
    success: bool,
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "No file uploaded")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Note`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Note)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NoteSchema {
    #[schema(example = 42)]
    id: i64,
    #[schema(example = "Limits and continuity")]
    title: Option<String>,
    description: Option<String>,
    #[schema(example = "Calculus")]
    subject: Option<String>,
    #[schema(example = "https://project.supabase.co/storage/v1/object/public/notes/1b4e.png")]
    file_url: String,
    #[schema(example = "ada@spelman.edu")]
    uploaded_by: Option<String>,
    #[schema(example = "Fall 2024")]
    semester: Option<String>,
    #[schema(example = "MATH201")]
    class_code: Option<String>,
    professor: Option<String>,
    department: Option<String>,
    /// Recognised text; empty when OCR was skipped or failed.
    ocr_text: String,
    #[schema(format = DateTime)]
    timestamp: String,
}

/// OpenAPI schema for [`crate::domain::IdentityUser`].
#[derive(ToSchema)]
#[schema(as = crate::domain::IdentityUser)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdentityUserSchema {
    id: String,
    #[schema(example = "ada@spelman.edu")]
    email: String,
    /// Profile metadata captured at sign-up, including `name`.
    user_metadata: serde_json::Value,
    #[schema(format = DateTime)]
    email_confirmed_at: Option<String>,
    #[schema(format = DateTime)]
    created_at: Option<String>,
}
