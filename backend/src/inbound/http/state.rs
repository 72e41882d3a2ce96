//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data`, so they depend on
//! driving ports only and can be tested with doubles.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, NoteCommand, NotesQuery};

/// Parameter object bundling the port implementations handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureIdentityProvider, FixtureNoteRepository, FixtureObjectStorage,
    ///     FixtureOcrEngine,
    /// };
    /// use backend::domain::{AccountService, NoteService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let notes = Arc::new(NoteService::new(
    ///     Arc::new(FixtureObjectStorage::default()),
    ///     Arc::new(FixtureOcrEngine),
    ///     Arc::new(FixtureNoteRepository),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     accounts: Arc::new(AccountService::new(Arc::new(FixtureIdentityProvider))),
    ///     notes: notes.clone(),
    ///     notes_query: notes,
    /// });
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            notes,
            notes_query,
        } = ports;
        Self {
            accounts,
            notes,
            notes_query,
        }
    }
}
