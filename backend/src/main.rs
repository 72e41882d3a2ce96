//! Backend entry-point: loads settings, wires collaborators and serves the
//! REST API alongside the front-end bundle.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use reqwest::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::ocr::TesseractOcrEngine;
use backend::outbound::supabase::SupabaseClient;
use server::{NotesSettings, ServerConfig, SupabaseCollaborators, SupabaseSettings, create_server};

/// Settings come from the environment and config files only.
fn settings_args() -> [OsString; 1] {
    [OsString::from(env!("CARGO_PKG_NAME"))]
}

fn supabase_collaborators(
    settings: &SupabaseSettings,
) -> color_eyre::Result<Option<SupabaseCollaborators>> {
    let Some((url, key)) = settings.credentials() else {
        return Ok(None);
    };
    let base_url = Url::parse(url).wrap_err("SUPABASE_URL is not a valid URL")?;
    let client = SupabaseClient::new(base_url, key, settings.timeout())
        .wrap_err("failed to build Supabase client")?;
    Ok(Some(SupabaseCollaborators {
        client,
        bucket: settings.bucket().to_owned(),
        notes_table: settings.notes_table().to_owned(),
    }))
}

fn server_config(
    notes: &NotesSettings,
    supabase: Option<SupabaseCollaborators>,
) -> ServerConfig {
    let platform_port = std::env::var("PORT").ok();
    let mut config = ServerConfig::new(
        notes.bind_addr(platform_port.as_deref()),
        notes.client_build_dir(),
    );
    if let Some(supabase) = supabase {
        config = config.with_supabase(supabase);
    }
    if notes.ocr_enabled {
        config = config.with_ocr(TesseractOcrEngine::new(
            notes.tesseract_command(),
            notes.ocr_language(),
            notes.ocr_timeout(),
        ));
    } else {
        info!("OCR disabled; image uploads are stored without text");
    }
    config
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let supabase_settings = SupabaseSettings::load_from_iter(settings_args())
        .map_err(|err| eyre!("failed to load Supabase settings: {err}"))?;
    let notes_settings = NotesSettings::load_from_iter(settings_args())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;

    let config = server_config(&notes_settings, supabase_collaborators(&supabase_settings)?);
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "server listening");
    server.await.wrap_err("server terminated with an error")
}
