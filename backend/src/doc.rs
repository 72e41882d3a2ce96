//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every JSON endpoint of the inbound layer together with
//! the schema wrappers from [`crate::inbound::http::schemas`], which describe
//! domain types without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::accounts::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, VerifyRequest,
};
use crate::inbound::http::diagnostics::DiagnosticResponse;
use crate::inbound::http::notes::{ListNotesResponse, UploadNoteForm, UploadNoteResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, IdentityUserSchema, NoteSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus notes API",
        description = "Account registration, note uploads with OCR, and catalog search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::verify,
        crate::inbound::http::notes::upload_note,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::diagnostics::test_db_access,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        VerifyRequest,
        MessageResponse,
        LoginResponse,
        UploadNoteForm,
        UploadNoteResponse,
        ListNotesResponse,
        DiagnosticResponse,
        NoteSchema,
        IdentityUserSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "accounts", description = "Registration, login and email verification"),
        (name = "notes", description = "Uploading and searching notes"),
        (name = "diagnostics", description = "Catalog connectivity checks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
