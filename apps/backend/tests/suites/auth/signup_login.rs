use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use notes_backend::clock::Clock;
use serde_json::json;

use crate::common::{assert_problem, json_body};
use crate::support::auth::{signup, PASSWORD};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn signup_returns_session_and_persists_user() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let email = unique_email("signup");

    let session = signup(&app, &email.to_uppercase()).await;

    assert_eq!(session["email"], email);
    assert_eq!(session["firstName"], "Test");
    assert!(session["lastName"].is_null());
    let user_id = session["userId"].as_str().unwrap();

    let stored = ctx.state.users.find_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), session["refreshToken"].as_str());
    assert_eq!(stored.last_login, Some(ctx.clock.now()));
}

#[actix_web::test]
async fn signup_rejects_duplicate_and_invalid_input() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let email = unique_email("dup");
    signup(&app, &email).await;

    let cases = [
        (json!({ "email": email, "password": PASSWORD }), StatusCode::CONFLICT, "UNIQUE_EMAIL"),
        (json!({ "email": "not-an-email", "password": PASSWORD }), StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
        (json!({ "email": unique_email("short"), "password": "short" }), StatusCode::BAD_REQUEST, "INVALID_PASSWORD"),
        (json!({ "email": unique_email("nopw") }), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
    ];

    for (body, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, status, code).await;
    }
}

#[actix_web::test]
async fn login_issues_fresh_pair() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let email = unique_email("login");
    let first = signup(&app, &email).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let session = json_body(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(session["userId"], first["userId"]);
    assert_ne!(session["refreshToken"], first["refreshToken"]);
    assert_ne!(session["accessToken"], first["accessToken"]);
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let email = unique_email("login-neg");
    signup(&app, &email).await;

    let wrong_password = json!({ "email": email, "password": "wrong-password" });
    let unknown_email = json!({ "email": unique_email("ghost"), "password": PASSWORD });

    let mut details = Vec::new();
    for body in [wrong_password, unknown_email] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
        details.push(problem.detail);
    }
    assert_eq!(details[0], details[1]);
}
