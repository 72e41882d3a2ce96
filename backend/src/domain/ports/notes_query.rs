//! Driving port for reading the notes catalog.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteFilter};

/// Domain use-case port for listing notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Notes matching `filter`, newest first.
    async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>, Error>;
}
