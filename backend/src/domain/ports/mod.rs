//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AccountCommand`, `NoteCommand`, `NotesQuery`) are called by
//! inbound adapters. Driven ports (`IdentityProvider`, `ObjectStorage`,
//! `NoteRepository`, `OcrEngine`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_provider;
mod note_command;
mod note_repository;
mod notes_query;
mod object_storage;
mod ocr_engine;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_USER_ID, FixtureIdentityProvider, IdentityProvider, IdentityProviderError,
};
#[cfg(test)]
pub use note_command::MockNoteCommand;
pub use note_command::{NoteCommand, UploadNoteRequest};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{FixtureNoteRepository, NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{FixtureObjectStorage, ObjectStorage, ObjectStorageError};
#[cfg(test)]
pub use ocr_engine::MockOcrEngine;
pub use ocr_engine::{FixtureOcrEngine, OcrEngine, OcrEngineError};
