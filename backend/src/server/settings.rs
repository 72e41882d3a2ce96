//! Environment-driven settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::outbound::ocr::{DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT};
use backend::outbound::supabase::{DEFAULT_BUCKET, DEFAULT_NOTES_TABLE, DEFAULT_TIMEOUT};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLIENT_BUILD_DIR: &str = "client/build";
const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Connection settings for the Supabase project.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPABASE")]
pub struct SupabaseSettings {
    /// Project URL, for example `https://abc.supabase.co`.
    pub url: Option<String>,
    /// Service-role key sent as `apikey` and bearer token.
    pub service_role_key: Option<String>,
    /// Storage bucket for uploaded files.
    pub bucket: Option<String>,
    /// Catalog table holding note rows.
    pub notes_table: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl SupabaseSettings {
    /// URL and key when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let key = self
            .service_role_key
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())?;
        Some((url, key))
    }

    /// Storage bucket, defaulting to `notes`.
    pub fn bucket(&self) -> &str {
        self.bucket.as_deref().unwrap_or(DEFAULT_BUCKET)
    }

    /// Catalog table, defaulting to `notes`.
    pub fn notes_table(&self) -> &str {
        self.notes_table.as_deref().unwrap_or(DEFAULT_NOTES_TABLE)
    }

    /// Per-request timeout for Supabase calls.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }
}

/// Listener, front-end and OCR settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct NotesSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// Port to bind; falls back to `PORT`, then 5000.
    pub port: Option<u16>,
    /// Directory holding the built front-end bundle.
    pub client_build_dir: Option<PathBuf>,
    /// Run OCR on image uploads.
    #[ortho_config(default = true)]
    pub ocr_enabled: bool,
    /// Tesseract executable.
    pub tesseract_command: Option<String>,
    /// Tesseract language pack.
    pub ocr_language: Option<String>,
    /// Upper bound on one OCR run in seconds.
    pub ocr_timeout_secs: Option<u64>,
}

impl NotesSettings {
    /// Socket address to bind. `platform_port` is the value of `PORT`, used
    /// when no explicit port is configured.
    pub fn bind_addr(&self, platform_port: Option<&str>) -> SocketAddr {
        let port = self
            .port
            .or_else(|| platform_port.and_then(|raw| raw.trim().parse().ok()))
            .unwrap_or(DEFAULT_PORT);
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(host, port)
    }

    pub fn client_build_dir(&self) -> PathBuf {
        self.client_build_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_BUILD_DIR))
    }

    pub fn tesseract_command(&self) -> &str {
        self.tesseract_command
            .as_deref()
            .unwrap_or(DEFAULT_TESSERACT_COMMAND)
    }

    pub fn ocr_language(&self) -> &str {
        self.ocr_language.as_deref().unwrap_or(DEFAULT_OCR_LANGUAGE)
    }

    pub fn ocr_timeout(&self) -> Duration {
        self.ocr_timeout_secs
            .map_or(DEFAULT_OCR_TIMEOUT, Duration::from_secs)
    }
}
