//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use backend::outbound::ocr::TesseractOcrEngine;
use backend::outbound::supabase::SupabaseClient;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) client_build_dir: PathBuf,
    pub(crate) supabase: Option<SupabaseCollaborators>,
    pub(crate) ocr: Option<TesseractOcrEngine>,
}

/// Supabase client plus the bucket and table the adapters target.
#[derive(Debug, Clone)]
pub struct SupabaseCollaborators {
    pub client: SupabaseClient,
    pub bucket: String,
    pub notes_table: String,
}

impl ServerConfig {
    /// Configuration with fixture collaborators and OCR disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, client_build_dir: PathBuf) -> Self {
        Self {
            bind_addr,
            client_build_dir,
            supabase: None,
            ocr: None,
        }
    }

    /// Back identity, storage and the catalog with a Supabase project.
    #[must_use]
    pub fn with_supabase(mut self, supabase: SupabaseCollaborators) -> Self {
        self.supabase = Some(supabase);
        self
    }

    /// Run OCR on image uploads with `engine`.
    #[must_use]
    pub fn with_ocr(mut self, engine: TesseractOcrEngine) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
