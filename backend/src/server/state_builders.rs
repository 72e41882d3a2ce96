//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::ports::{
    FixtureIdentityProvider, FixtureNoteRepository, FixtureObjectStorage, FixtureOcrEngine,
    IdentityProvider, NoteRepository, ObjectStorage, OcrEngine,
};
use backend::domain::{AccountService, NoteService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::supabase::{
    PostgrestNoteRepository, SupabaseIdentityProvider, SupabaseObjectStorage,
};

use super::ServerConfig;

/// Driven adapters selected from configuration.
struct DrivenPorts {
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
    ocr: Arc<dyn OcrEngine>,
    notes: Arc<dyn NoteRepository>,
}

fn select_driven_ports(config: &ServerConfig) -> DrivenPorts {
    let ocr: Arc<dyn OcrEngine> = match &config.ocr {
        Some(engine) => Arc::new(engine.clone()),
        None => Arc::new(FixtureOcrEngine),
    };

    match &config.supabase {
        Some(supabase) => DrivenPorts {
            identity: Arc::new(SupabaseIdentityProvider::new(supabase.client.clone())),
            storage: Arc::new(SupabaseObjectStorage::new(
                supabase.client.clone(),
                supabase.bucket.clone(),
            )),
            ocr,
            notes: Arc::new(PostgrestNoteRepository::new(
                supabase.client.clone(),
                supabase.notes_table.clone(),
            )),
        },
        None => {
            warn!("Supabase is not configured; using fixture collaborators");
            DrivenPorts {
                identity: Arc::new(FixtureIdentityProvider),
                storage: Arc::new(FixtureObjectStorage::default()),
                ocr,
                notes: Arc::new(FixtureNoteRepository),
            }
        }
    }
}

/// Build the shared HTTP state from the configured collaborators.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let DrivenPorts {
        identity,
        storage,
        ocr,
        notes,
    } = select_driven_ports(config);

    let note_service = Arc::new(NoteService::new(storage, ocr, notes));
    web::Data::new(HttpState::new(HttpStatePorts {
        accounts: Arc::new(AccountService::new(identity)),
        notes: note_service.clone(),
        notes_query: note_service,
    }))
}
