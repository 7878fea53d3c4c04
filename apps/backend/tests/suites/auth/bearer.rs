use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::assert_problem;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn protected_routes_require_bearer() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;

    for uri in ["/api/notes", "/api/search?q=x"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    }
}

#[actix_web::test]
async fn malformed_authorization_headers() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;

    let cases = [
        ("Basic dXNlcjpwYXNz", "UNAUTHORIZED_MISSING_BEARER"),
        ("Bearer", "UNAUTHORIZED_MISSING_BEARER"),
        ("Bearer not.a.jwt", "UNAUTHORIZED_INVALID_JWT"),
    ];
    for (value, code) in cases {
        let req = test::TestRequest::get()
            .uri("/api/notes")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, StatusCode::UNAUTHORIZED, code).await;
    }
}

#[actix_web::test]
async fn public_routes_need_no_token() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}
