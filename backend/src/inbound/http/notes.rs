//! Note HTTP handlers.
//!
//! ```text
//! POST /upload-note   multipart/form-data: file + metadata fields
//! GET  /notes?semester=Fall%202024&professor=smith
//! ```

use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::UploadNoteRequest;
use crate::domain::{Error, Note, NoteFilter, NoteMetadata, UploadedFile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NoteSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ValidationCode, field_error};

const NO_FILE_MESSAGE: &str = "No file uploaded";
const FILE_FIELD: &str = "file";

/// Multipart form accepted by `POST /upload-note`. Documentation only; the
/// handler reads the stream directly.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadNoteForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    title: Option<String>,
    description: Option<String>,
    subject: Option<String>,
    /// Uploader's email address.
    email: Option<String>,
    semester: Option<String>,
    class_code: Option<String>,
    professor: Option<String>,
    department: Option<String>,
}

/// Success envelope for `POST /upload-note`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadNoteResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = NoteSchema)]
    pub note: Note,
}

/// Query parameters for `GET /notes`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Exact semester match.
    pub semester: Option<String>,
    /// Exact department match.
    pub department: Option<String>,
    /// Case-insensitive substring of the professor's name.
    pub professor: Option<String>,
    /// Case-insensitive substring of the class code.
    pub class_code: Option<String>,
}

impl From<ListNotesQuery> for NoteFilter {
    fn from(value: ListNotesQuery) -> Self {
        NoteFilter::new(
            value.semester,
            value.department,
            value.professor,
            value.class_code,
        )
    }
}

/// Success envelope for `GET /notes`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListNotesResponse {
    pub success: bool,
    #[schema(value_type = Vec<NoteSchema>)]
    pub notes: Vec<Note>,
}

fn no_file_error() -> Error {
    field_error(
        FieldName::new(FILE_FIELD),
        ValidationCode::MissingField,
        NO_FILE_MESSAGE,
    )
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| {
            debug!(error = %err, "multipart field could not be read");
            no_file_error()
        })?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn assign_metadata(metadata: &mut NoteMetadata, name: &str, value: String) {
    let slot = match name {
        "title" => &mut metadata.title,
        "description" => &mut metadata.description,
        "subject" => &mut metadata.subject,
        "email" => &mut metadata.uploaded_by,
        "semester" => &mut metadata.semester,
        "class_code" => &mut metadata.class_code,
        "professor" => &mut metadata.professor,
        "department" => &mut metadata.department,
        _ => return,
    };
    *slot = Some(value);
}

/// Drain the multipart stream into an upload request.
///
/// Unknown parts are ignored. A stream error or a missing `file` part yields
/// the same client error.
async fn read_upload(mut payload: Multipart) -> Result<UploadNoteRequest, Error> {
    let mut file = None;
    let mut metadata = NoteMetadata::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|err| {
            debug!(error = %err, "malformed multipart body");
            no_file_error()
        })?;
        let name = field.name().map(str::to_owned);
        let bytes = read_field(&mut field).await?;
        match name.as_deref() {
            Some(FILE_FIELD) if file.is_none() => {
                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_owned);
                let content_type = field.content_type().map(ToString::to_string);
                file = Some(UploadedFile::new(original_name, content_type, bytes));
            }
            Some(other) => {
                assign_metadata(&mut metadata, other, String::from_utf8_lossy(&bytes).into_owned());
            }
            None => {}
        }
    }

    let file = file.ok_or_else(no_file_error)?;
    Ok(UploadNoteRequest { file, metadata })
}

/// Upload a note file with its metadata.
#[utoipa::path(
    post,
    path = "/upload-note",
    request_body(content = UploadNoteForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Note stored", body = UploadNoteResponse),
        (status = 400, description = "No file uploaded", body = ErrorSchema),
        (status = 500, description = "Storage or catalog error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "uploadNote"
)]
#[post("/upload-note")]
pub async fn upload_note(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<UploadNoteResponse>> {
    let request = read_upload(payload).await?;
    let note = state.notes.upload(request).await?;
    Ok(web::Json(UploadNoteResponse {
        success: true,
        message: "Note uploaded successfully".to_owned(),
        note,
    }))
}

/// List notes, newest first, optionally filtered.
#[utoipa::path(
    get,
    path = "/notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Matching notes", body = ListNotesResponse),
        (status = 500, description = "Catalog error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    query: web::Query<ListNotesQuery>,
) -> ApiResult<web::Json<ListNotesResponse>> {
    let notes = state
        .notes_query
        .list_notes(query.into_inner().into())
        .await?;
    Ok(web::Json(ListNotesResponse {
        success: true,
        notes,
    }))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
