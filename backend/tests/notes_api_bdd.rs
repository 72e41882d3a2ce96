//! Behaviour tests for the notes HTTP surface.
//!
//! Scenarios drive the real handlers and services through an in-process
//! actix service backed by the recording doubles from
//! `backend::test_support`, then inspect what reached each collaborator.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::sync::Arc;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test, web};
use backend::Trace;
use backend::domain::ports::OcrEngineError;
use backend::domain::{AccountService, NoteService, TRACE_ID_HEADER};
use backend::inbound::http::accounts::{login, register, verify};
use backend::inbound::http::notes::{list_notes, upload_note};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::validation::{json_config, query_config};
use backend::test_support::{
    InMemoryNoteRepository, RecordingIdentityProvider, RecordingObjectStorage, ScriptedOcrEngine,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const BOUNDARY: &str = "----notes-bdd-boundary";
const ADA_EMAIL: &str = "ada@spelman.edu";
const ADA_PASSWORD: &str = "correct horse";
const RECOGNISED_TEXT: &str = "Limits and continuity";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nscan";

struct NotesWorld {
    runtime: actix_rt::Runtime,
    identity: Arc<RecordingIdentityProvider>,
    storage: Arc<RecordingObjectStorage>,
    ocr: Arc<ScriptedOcrEngine>,
    catalog: Arc<InMemoryNoteRepository>,
    last_status: Option<u16>,
    last_trace_id: Option<String>,
    last_body: Option<Value>,
}

impl NotesWorld {
    fn new() -> Self {
        Self {
            runtime: actix_rt::Runtime::new().expect("actix runtime"),
            identity: Arc::new(RecordingIdentityProvider::new()),
            storage: Arc::new(RecordingObjectStorage::default()),
            ocr: Arc::new(ScriptedOcrEngine::returning(RECOGNISED_TEXT)),
            catalog: Arc::new(InMemoryNoteRepository::new()),
            last_status: None,
            last_trace_id: None,
            last_body: None,
        }
    }

    fn http_state(&self) -> web::Data<HttpState> {
        let notes = Arc::new(NoteService::new(
            Arc::clone(&self.storage),
            Arc::clone(&self.ocr),
            Arc::clone(&self.catalog),
        ));
        web::Data::new(HttpState::new(HttpStatePorts {
            accounts: Arc::new(AccountService::new(Arc::clone(&self.identity))),
            notes: notes.clone(),
            notes_query: notes,
        }))
    }

    fn perform(&mut self, request: actix_test::TestRequest) {
        let state = self.http_state();
        let (status, trace_id, body) = self.runtime.block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(json_config())
                    .app_data(query_config())
                    .wrap(Trace)
                    .service(register)
                    .service(login)
                    .service(verify)
                    .service(upload_note)
                    .service(list_notes),
            )
            .await;
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let bytes = actix_test::read_body(response).await;
            let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
            (status, trace_id, body)
        });
        self.last_status = Some(status);
        self.last_trace_id = trace_id;
        self.last_body = Some(body);
    }

    fn post_json(&mut self, path: &str, payload: &Value) {
        self.perform(
            actix_test::TestRequest::post()
                .uri(path)
                .set_json(payload),
        );
    }

    fn upload(&mut self, fields: &[(&str, &str)], filename: &str, content_type: &str, bytes: &[u8]) {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.perform(
            actix_test::TestRequest::post()
                .uri("/upload-note")
                .insert_header((
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                ))
                .set_payload(body),
        );
    }

    fn body(&self) -> &Value {
        self.last_body.as_ref().expect("response body")
    }
}

#[fixture]
fn world() -> RefCell<NotesWorld> {
    RefCell::new(NotesWorld::new())
}

fn register_ada(world: &RefCell<NotesWorld>, email: &str) {
    world.borrow_mut().post_json(
        "/register",
        &json!({ "name": "Ada", "email": email, "password": ADA_PASSWORD }),
    );
}

fn upload_png_scan(world: &RefCell<NotesWorld>) {
    world.borrow_mut().upload(
        &[
            ("title", "Limits"),
            ("email", ADA_EMAIL),
            ("semester", "Fall 2024"),
            ("department", "Mathematics"),
            ("class_code", "MATH201"),
        ],
        "limits.png",
        "image/png",
        PNG_BYTES,
    );
}

#[given("a notes server with recording collaborators")]
fn a_notes_server_with_recording_collaborators(world: &RefCell<NotesWorld>) {
    assert!(world.borrow().catalog.rows().is_empty());
}

#[given("Ada has registered")]
fn ada_has_registered(world: &RefCell<NotesWorld>) {
    register_ada(world, ADA_EMAIL);
    assert_eq!(world.borrow().last_status, Some(200));
}

#[given("the identity provider only accepts code 654321")]
fn the_identity_provider_only_accepts_code(world: &RefCell<NotesWorld>) {
    world.borrow().identity.expect_code("654321");
}

#[given("the OCR engine fails")]
fn the_ocr_engine_fails(world: &RefCell<NotesWorld>) {
    world.borrow_mut().ocr = Arc::new(ScriptedOcrEngine::failing(OcrEngineError::failed(
        "Error in pixReadMem",
    )));
}

#[given("object storage rejects uploads")]
fn object_storage_rejects_uploads(world: &RefCell<NotesWorld>) {
    world.borrow().storage.fail_with("Bucket not found");
}

#[when("Ada registers with an institutional address")]
fn ada_registers_with_an_institutional_address(world: &RefCell<NotesWorld>) {
    register_ada(world, ADA_EMAIL);
}

#[when("Ada registers with a personal address")]
fn ada_registers_with_a_personal_address(world: &RefCell<NotesWorld>) {
    register_ada(world, "ada@gmail.com");
}

#[when("Ada logs in with her password")]
fn ada_logs_in_with_her_password(world: &RefCell<NotesWorld>) {
    world.borrow_mut().post_json(
        "/login",
        &json!({ "email": ADA_EMAIL, "password": ADA_PASSWORD }),
    );
}

#[when("Ada logs in with the wrong password")]
fn ada_logs_in_with_the_wrong_password(world: &RefCell<NotesWorld>) {
    world.borrow_mut().post_json(
        "/login",
        &json!({ "email": ADA_EMAIL, "password": "wrong" }),
    );
}

#[when("Ada verifies with code 123456")]
fn ada_verifies_with_code(world: &RefCell<NotesWorld>) {
    world.borrow_mut().post_json(
        "/verify",
        &json!({ "email": ADA_EMAIL, "verificationCode": "123456" }),
    );
}

#[when("Ada uploads a PNG scan for Fall 2024 mathematics")]
fn ada_uploads_a_png_scan(world: &RefCell<NotesWorld>) {
    upload_png_scan(world);
}

#[when("Ada uploads a PDF handout")]
fn ada_uploads_a_pdf_handout(world: &RefCell<NotesWorld>) {
    world.borrow_mut().upload(
        &[
            ("title", "Syllabus"),
            ("email", ADA_EMAIL),
            ("semester", "Spring 2025"),
            ("department", "Mathematics"),
        ],
        "syllabus.pdf",
        "application/pdf",
        b"%PDF-1.7",
    );
}

#[when("the client lists notes for semester Fall 2024")]
fn the_client_lists_notes_for_semester(world: &RefCell<NotesWorld>) {
    world
        .borrow_mut()
        .perform(actix_test::TestRequest::get().uri("/notes?semester=Fall%202024"));
}

#[then("the response succeeds")]
fn the_response_succeeds(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200), "body: {:?}", ctx.last_body);
    assert_eq!(ctx.body().get("success"), Some(&Value::Bool(true)));
}

#[then("the identity provider recorded Ada's sign-up with her name")]
fn the_identity_provider_recorded_the_sign_up(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    let sign_ups = ctx.identity.sign_ups();
    assert_eq!(sign_ups.len(), 1);
    assert_eq!(sign_ups.first().map(|r| r.name.as_str()), Some("Ada"));
    assert_eq!(sign_ups.first().map(|r| r.email.as_str()), Some(ADA_EMAIL));
}

#[then("the response is a bad request naming the email field")]
fn the_response_is_a_bad_request_naming_the_email_field(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(400));
    let body = ctx.body();
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Email must end with @spelman.edu or @morehouse.edu.")
    );
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("email")
    );
}

#[then("the identity provider recorded no sign-ups")]
fn the_identity_provider_recorded_no_sign_ups(world: &RefCell<NotesWorld>) {
    assert!(world.borrow().identity.sign_ups().is_empty());
}

#[then("the login response carries Ada's profile")]
fn the_login_response_carries_the_profile(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    let body = ctx.body();
    assert_eq!(
        body.pointer("/user/email").and_then(Value::as_str),
        Some(ADA_EMAIL)
    );
    assert_eq!(
        body.pointer("/user/user_metadata/name").and_then(Value::as_str),
        Some("Ada")
    );
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.body();
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Invalid email or password")
    );
}

#[then("the response is a bad request about the verification code")]
fn the_response_is_a_bad_request_about_the_code(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(400));
    assert_eq!(
        ctx.body().get("message").and_then(Value::as_str),
        Some("Invalid verification code.")
    );
    assert!(ctx.identity.verified_emails().is_empty());
}

#[then("the stored note carries the recognised text")]
fn the_stored_note_carries_the_recognised_text(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.body().pointer("/note/ocr_text").and_then(Value::as_str),
        Some(RECOGNISED_TEXT)
    );
    assert_eq!(ctx.ocr.calls(), vec!["image/png".to_owned()]);
    let objects = ctx.storage.objects();
    let stored = objects.values().next().expect("stored object");
    assert_eq!(stored.bytes, PNG_BYTES);
    assert_eq!(stored.content_type, "image/png");
}

#[then("the note is listed with its file URL")]
fn the_note_is_listed_with_its_file_url(world: &RefCell<NotesWorld>) {
    let file_url = world
        .borrow()
        .body()
        .pointer("/note/file_url")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .expect("file url");
    assert!(file_url.ends_with(".png"), "{file_url}");

    world
        .borrow_mut()
        .perform(actix_test::TestRequest::get().uri("/notes"));
    let ctx = world.borrow();
    let notes = ctx
        .body()
        .get("notes")
        .and_then(Value::as_array)
        .expect("notes array");
    assert_eq!(notes.len(), 1);
    let listed = notes.first().expect("one note");
    assert_eq!(
        listed.get("file_url").and_then(Value::as_str),
        Some(file_url.as_str())
    );
    assert_eq!(listed.get("uploaded_by").and_then(Value::as_str), Some(ADA_EMAIL));
    assert_eq!(listed.get("class_code").and_then(Value::as_str), Some("MATH201"));
}

#[then("OCR was not attempted")]
fn ocr_was_not_attempted(world: &RefCell<NotesWorld>) {
    assert!(world.borrow().ocr.calls().is_empty());
}

#[then("the stored note has empty OCR text")]
fn the_stored_note_has_empty_ocr_text(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.body().pointer("/note/ocr_text").and_then(Value::as_str),
        Some("")
    );
}

#[then("the response is a service error")]
fn the_response_is_a_service_error(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(500));
    assert_eq!(
        ctx.body().get("code").and_then(Value::as_str),
        Some("service_error")
    );
}

#[then("the catalog is empty")]
fn the_catalog_is_empty(world: &RefCell<NotesWorld>) {
    assert!(world.borrow().catalog.rows().is_empty());
}

#[then("exactly one note is listed")]
fn exactly_one_note_is_listed(world: &RefCell<NotesWorld>) {
    let ctx = world.borrow();
    let notes = ctx
        .body()
        .get("notes")
        .and_then(Value::as_array)
        .expect("notes array");
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes
            .first()
            .and_then(|note| note.get("semester"))
            .and_then(Value::as_str),
        Some("Fall 2024")
    );
}

#[scenario(path = "tests/features/notes_api.feature")]
fn notes_api_scenarios(world: RefCell<NotesWorld>) {
    drop(world);
}
