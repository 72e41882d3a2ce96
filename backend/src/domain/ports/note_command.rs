//! Driving port for writing notes to the catalog.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteMetadata, UploadedFile};

/// A file plus the form metadata submitted with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNoteRequest {
    pub file: UploadedFile,
    pub metadata: NoteMetadata,
}

/// Domain use-case port for note creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteCommand: Send + Sync {
    /// Store the file, extract text when possible and record the catalog row.
    async fn upload(&self, request: UploadNoteRequest) -> Result<Note, Error>;

    /// Write the fixed probe row to confirm catalog connectivity.
    async fn insert_diagnostic_note(&self) -> Result<Vec<Note>, Error>;
}
