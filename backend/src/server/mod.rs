//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::{ServerConfig, SupabaseCollaborators};
pub use settings::{NotesSettings, SupabaseSettings};

use state_builders::build_http_state;

use std::path::PathBuf;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::accounts::{login, register, verify};
use backend::inbound::http::diagnostics::test_db_access;
use backend::inbound::http::frontend::frontend_service;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::notes::{list_notes, upload_note};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::validation::{json_config, query_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    client_build_dir: PathBuf,
}

/// Assemble the application. The front-end service is registered last so
/// every API route and probe wins over the fallback.
fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        client_build_dir,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(register)
        .service(login)
        .service(verify)
        .service(upload_note)
        .service(list_notes)
        .service(test_db_access);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(frontend_service(client_build_dir))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();
    let ServerConfig {
        client_build_dir, ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            client_build_dir: client_build_dir.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Routing tests for the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::Value;
    use tempfile::TempDir;

    const INDEX_HTML: &str = "<!doctype html><title>notes</title>";

    struct Harness {
        _dir: TempDir,
        deps: AppDependencies,
    }

    #[fixture]
    fn harness() -> Harness {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), INDEX_HTML).expect("write index");
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("valid addr"),
            dir.path().to_path_buf(),
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        Harness {
            deps: AppDependencies {
                health_state,
                http_state: build_http_state(&config),
                client_build_dir: config.client_build_dir.clone(),
            },
            _dir: dir,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn api_routes_win_over_the_front_end(harness: Harness) {
        let app = actix_test::init_service(build_app(harness.deps.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/notes").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("success"), Some(&Value::Bool(true)));

        let probe = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(probe.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn diagnostics_route_is_reachable(harness: Harness) {
        let app = actix_test::init_service(build_app(harness.deps.clone())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/test-db-access").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_fall_back_to_the_index(harness: Harness) {
        let app = actix_test::init_service(build_app(harness.deps.clone())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/notes/browse/42").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), INDEX_HTML.as_bytes());
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_the_error_envelope(harness: Harness) {
        let app = actix_test::init_service(build_app(harness.deps.clone())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("success"), Some(&Value::Bool(false)));
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
    }
}
