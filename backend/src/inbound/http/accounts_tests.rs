//! Tests for account HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockAccountCommand;
use crate::inbound::http::test_utils::{PortDoubles, http_state};
use crate::inbound::http::validation::json_config;

async fn post_json(accounts: MockAccountCommand, uri: &str, body: Value) -> (StatusCode, Value) {
    let state = http_state(PortDoubles {
        accounts,
        ..PortDoubles::default()
    });
    let app = actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_config())
            .service(register)
            .service(login)
            .service(verify),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn sample_user() -> IdentityUser {
    IdentityUser {
        id: "2b7e1c1a-0000-4000-8000-000000000000".to_owned(),
        email: "ada@spelman.edu".to_owned(),
        user_metadata: json!({ "name": "Ada" }),
        email_confirmed_at: None,
        created_at: None,
    }
}

#[rstest]
#[actix_web::test]
async fn register_accepts_institutional_addresses() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_register()
        .withf(|r| r.name() == "Ada" && r.email().as_ref() == "ada@morehouse.edu")
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = post_json(
        accounts,
        "/register",
        json!({ "name": "Ada", "email": "ada@morehouse.edu", "password": "pw123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Registration successful. Check your email for verification.",
        })
    );
}

#[rstest]
#[case(json!({ "name": "Ada", "email": "ada@gmail.com", "password": "pw" }))]
#[case(json!({ "name": "Ada", "email": "ada@cs.spelman.edu", "password": "pw" }))]
#[case(json!({ "name": "Ada", "password": "pw" }))]
#[actix_web::test]
async fn register_rejects_other_addresses_without_calling_identity(#[case] payload: Value) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_register().times(0);

    let (status, body) = post_json(accounts, "/register", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(
        body["message"],
        "Email must end with @spelman.edu or @morehouse.edu."
    );
    assert_eq!(body["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn register_surfaces_service_errors() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::service("User already registered")));

    let (status, body) = post_json(
        accounts,
        "/register",
        json!({ "name": "Ada", "email": "ada@spelman.edu", "password": "pw123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "User already registered");
}

#[rstest]
#[actix_web::test]
async fn login_returns_the_user() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_login()
        .withf(|c| c.email() == "ada@spelman.edu" && c.password() == "pw123456")
        .times(1)
        .return_once(|_| Ok(sample_user()));

    let (status, body) = post_json(
        accounts,
        "/login",
        json!({ "email": "ada@spelman.edu", "password": "pw123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "ada@spelman.edu");
    assert_eq!(body["user"]["user_metadata"]["name"], "Ada");
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "email": "ada@spelman.edu" }))]
#[case(json!({ "email": "  ", "password": "pw" }))]
#[case(json!({ "email": null, "password": "pw" }))]
#[case(json!({ "email": "ada@spelman.edu", "password": 42 }))]
#[case(json!(["ada@spelman.edu", "pw"]))]
#[actix_web::test]
async fn login_with_missing_fields_is_unauthorized(#[case] payload: Value) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_login().times(0);

    let (status, body) = post_json(accounts, "/login", payload).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[case("application/x-www-form-urlencoded", "email=ada%40spelman.edu&password=pw")]
#[case("application/json", "{not json")]
#[case("text/plain", "")]
#[actix_web::test]
async fn login_with_unreadable_bodies_is_unauthorized(
    #[case] content_type: &str,
    #[case] payload: &'static str,
) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_login().times(0);
    let state = http_state(PortDoubles {
        accounts,
        ..PortDoubles::default()
    });
    let app = actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_config())
            .service(login),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/login")
        .insert_header(("content-type", content_type))
        .set_payload(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn login_failures_share_one_message() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_login()
        .times(1)
        .return_once(|_| Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)));

    let (status, body) = post_json(
        accounts,
        "/login",
        json!({ "email": "nobody@spelman.edu", "password": "wrong" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn verify_confirms_six_digit_codes() {
    let mut accounts = MockAccountCommand::new();
    accounts
        .expect_verify()
        .withf(|v| v.email == "ada@spelman.edu" && v.code.expose() == "123456")
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = post_json(
        accounts,
        "/verify",
        json!({ "email": "ada@spelman.edu", "verificationCode": "123456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Email verified successfully" })
    );
}

#[rstest]
#[case("12345")]
#[case("abcdef")]
#[case("")]
#[actix_web::test]
async fn verify_rejects_malformed_codes_locally(#[case] code: &str) {
    let mut accounts = MockAccountCommand::new();
    accounts.expect_verify().times(0);

    let (status, body) = post_json(
        accounts,
        "/verify",
        json!({ "email": "ada@spelman.edu", "verificationCode": code }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_VERIFICATION_CODE_MESSAGE);
    assert_eq!(body["details"]["field"], "verificationCode");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let state = http_state(PortDoubles::default());
    let app = actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_config())
            .service(register),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_request");
}
