//! Note upload and listing service.
//!
//! Implements [`NoteCommand`] and [`NotesQuery`] over the storage, OCR and
//! catalog ports. An upload stores the file first and writes the catalog row
//! last, so a row never references a file that failed to store. The reverse
//! gap (stored file, failed row) is logged and left in place.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    NoteCommand, NoteRepository, NoteRepositoryError, NotesQuery, ObjectStorage, OcrEngine,
    UploadNoteRequest,
};
use crate::domain::{Error, NewNote, Note, NoteFilter, ObjectName, UploadedFile};

fn map_repository_error(error: NoteRepositoryError) -> Error {
    Error::from_collaborator(error.to_string())
}

/// Note service implementing the note driving ports.
pub struct NoteService<S: ?Sized, O: ?Sized, R: ?Sized> {
    storage: Arc<S>,
    ocr: Arc<O>,
    notes: Arc<R>,
}

impl<S: ?Sized, O: ?Sized, R: ?Sized> Clone for NoteService<S, O, R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            ocr: Arc::clone(&self.ocr),
            notes: Arc::clone(&self.notes),
        }
    }
}

impl<S: ?Sized, O: ?Sized, R: ?Sized> NoteService<S, O, R> {
    /// Create a service over the given collaborators.
    pub fn new(storage: Arc<S>, ocr: Arc<O>, notes: Arc<R>) -> Self {
        Self {
            storage,
            ocr,
            notes,
        }
    }
}

impl<S: ?Sized, O, R: ?Sized> NoteService<S, O, R>
where
    O: OcrEngine + ?Sized,
{
    /// Run OCR on eligible files. Failures degrade to empty text.
    async fn extract_text(&self, name: &ObjectName, file: &UploadedFile) -> String {
        if !file.is_ocr_eligible() {
            info!(
                object = %name,
                content_type = file.content_type(),
                "skipping OCR for non-image upload"
            );
            return String::new();
        }

        debug!(object = %name, bytes = file.bytes().len(), "starting OCR");
        match self.ocr.recognize(file.bytes(), file.content_type()).await {
            Ok(text) => {
                debug!(object = %name, chars = text.chars().count(), "OCR finished");
                text
            }
            Err(err) => {
                warn!(object = %name, error = %err, "OCR failed; storing empty text");
                String::new()
            }
        }
    }
}

#[async_trait]
impl<S, O, R> NoteCommand for NoteService<S, O, R>
where
    S: ObjectStorage + ?Sized,
    O: OcrEngine + ?Sized,
    R: NoteRepository + ?Sized,
{
    async fn upload(&self, request: UploadNoteRequest) -> Result<Note, Error> {
        let UploadNoteRequest { file, metadata } = request;
        let name = ObjectName::generate(file.original_name());

        self.storage
            .upload(&name, file.content_type(), file.bytes())
            .await
            .map_err(|err| {
                error!(object = %name, error = %err, "storing upload failed");
                Error::from_collaborator(err.to_string())
            })?;

        let file_url = self.storage.public_url(&name);
        let ocr_text = self.extract_text(&name, &file).await;
        let row = NewNote::from_upload(metadata, file_url, ocr_text);

        let note = self.notes.insert(&row).await.map_err(|err| {
            error!(
                object = %name,
                error = %err,
                "catalog insert failed; stored object is orphaned"
            );
            map_repository_error(err)
        })?;

        info!(note_id = note.id, object = %name, "note uploaded");
        Ok(note)
    }

    async fn insert_diagnostic_note(&self) -> Result<Vec<Note>, Error> {
        let note = self
            .notes
            .insert(&NewNote::diagnostic())
            .await
            .map_err(|err| {
                error!(error = %err, "diagnostic catalog insert failed");
                map_repository_error(err)
            })?;
        info!(note_id = note.id, "diagnostic note inserted");
        Ok(vec![note])
    }
}

#[async_trait]
impl<S, O, R> NotesQuery for NoteService<S, O, R>
where
    S: ObjectStorage + ?Sized,
    O: OcrEngine + ?Sized,
    R: NoteRepository + ?Sized,
{
    async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>, Error> {
        let notes = self.notes.list(&filter).await.map_err(|err| {
            error!(error = %err, ?filter, "listing notes failed");
            map_repository_error(err)
        })?;
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;
