//! Driven port for the notes catalog.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewNote, Note, NoteFilter};

use super::define_port_error;

define_port_error! {
    /// Failures reported by catalog adapters.
    pub enum NoteRepositoryError {
        /// The catalog refused the query or mutation.
        Rejected { message: String } => "{message}",
        /// The catalog could not be reached.
        Transport { message: String } => "notes catalog unreachable: {message}",
        /// The catalog answered with rows we could not read.
        Decode { message: String } => "notes catalog response malformed: {message}",
    }
}

/// Port for writing and listing notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert one row and return it as stored, with `id` and `timestamp`
    /// assigned by the catalog.
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError>;

    /// Return rows matching `filter`, newest first.
    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NoteRepositoryError>;
}

/// Catalog used when no collaborator is configured. Inserts are echoed back
/// and never listed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNoteRepository;

#[async_trait]
impl NoteRepository for FixtureNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        Ok(Note::from_new(1, note.clone(), Utc::now()))
    }

    async fn list(&self, _filter: &NoteFilter) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(Vec::new())
    }
}
