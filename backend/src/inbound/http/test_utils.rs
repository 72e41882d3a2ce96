//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockAccountCommand, MockNoteCommand, MockNotesQuery};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Driving port doubles handed to [`http_state`].
///
/// Each mock starts with no expectations, so any unexpected call fails the
/// test.
#[derive(Default)]
pub struct PortDoubles {
    pub accounts: MockAccountCommand,
    pub notes: MockNoteCommand,
    pub notes_query: MockNotesQuery,
}

/// Wrap port doubles in the state handlers extract.
pub fn http_state(doubles: PortDoubles) -> web::Data<HttpState> {
    let PortDoubles {
        accounts,
        notes,
        notes_query,
    } = doubles;
    web::Data::new(HttpState::new(HttpStatePorts {
        accounts: Arc::new(accounts),
        notes: Arc::new(notes),
        notes_query: Arc::new(notes_query),
    }))
}
