//! PostgREST-backed notes catalog.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NewNote, Note, NoteFilter};

use super::{Failure, SupabaseClient, dto, send};

/// Reads and writes the notes table through the PostgREST API.
#[derive(Debug, Clone)]
pub struct PostgrestNoteRepository {
    client: SupabaseClient,
    table: String,
}

impl PostgrestNoteRepository {
    /// Read and write rows of `table` through PostgREST.
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn segments(&self) -> [&str; 3] {
        ["rest", "v1", self.table.as_str()]
    }
}

fn map_failure(failure: Failure) -> NoteRepositoryError {
    match failure {
        Failure::Rejected(message) => NoteRepositoryError::rejected(message),
        Failure::Unavailable(message) => NoteRepositoryError::transport(message),
    }
}

/// Substring pattern for PostgREST `ilike`, with SQL wildcards in the input
/// taken literally. `*` is PostgREST's wildcard and cannot be escaped.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('*');
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('*');
    pattern
}

/// Query string for a filtered listing, newest first.
fn list_query_pairs(filter: &NoteFilter) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("select", "*".to_owned())];
    if let Some(semester) = filter.semester() {
        pairs.push(("semester", format!("eq.{semester}")));
    }
    if let Some(department) = filter.department() {
        pairs.push(("department", format!("eq.{department}")));
    }
    if let Some(professor) = filter.professor() {
        pairs.push(("professor", format!("ilike.{}", like_pattern(professor))));
    }
    if let Some(class_code) = filter.class_code() {
        pairs.push(("class_code", format!("ilike.{}", like_pattern(class_code))));
    }
    pairs.push(("order", "timestamp.desc".to_owned()));
    pairs
}

#[async_trait]
impl NoteRepository for PostgrestNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let request = self
            .client
            .request(Method::POST, &self.segments())
            .header("Prefer", "return=representation")
            .json(note);
        let body = send(request).await.map_err(map_failure)?;
        let stored = dto::first_row(&body).map_err(NoteRepositoryError::decode)?;
        debug!(id = stored.id, table = %self.table, "note row inserted");
        Ok(stored)
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NoteRepositoryError> {
        let request = self
            .client
            .request(Method::GET, &self.segments())
            .query(&list_query_pairs(filter));
        let body = send(request).await.map_err(map_failure)?;
        dto::rows(&body).map_err(NoteRepositoryError::decode)
    }
}
