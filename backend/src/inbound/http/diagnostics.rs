//! Catalog connectivity probe.
//!
//! ```text
//! GET /test-db-access
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Note;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NoteSchema};
use crate::inbound::http::state::HttpState;

/// Success envelope for `GET /test-db-access`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Vec<NoteSchema>)]
    pub data: Vec<Note>,
}

/// Insert a fixed probe row to confirm the catalog accepts writes.
#[utoipa::path(
    get,
    path = "/test-db-access",
    responses(
        (status = 200, description = "Catalog accepted the probe row", body = DiagnosticResponse),
        (status = 500, description = "Catalog error", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "testDbAccess"
)]
#[get("/test-db-access")]
pub async fn test_db_access(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DiagnosticResponse>> {
    let data = state.notes.insert_diagnostic_note().await?;
    Ok(web::Json(DiagnosticResponse {
        success: true,
        message: "Database access working properly".to_owned(),
        data,
    }))
}
