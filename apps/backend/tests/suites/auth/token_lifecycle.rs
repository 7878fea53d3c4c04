use actix_web::http::StatusCode;
use actix_web::test;
use notes_backend::auth::{TokenIssuer, TokenState};
use notes_backend::clock::SharedClock;
use notes_backend::{SecurityConfig, TokenKind};
use serde_json::json;
use time::Duration;

use crate::common::assert_problem;
use crate::support::auth::{access_token, bearer, signup, PASSWORD};
use crate::support::{build_test_state, create_test_app};

/// Signup, login, then use the access token inside and past its 24h lifetime.
#[actix_web::test]
async fn access_token_accepted_within_24h_and_expired_after() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    signup(&app, "a@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": PASSWORD }))
        .to_request();
    let session: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let token = access_token(&session);

    match ctx.state.validator.inspect(&token, TokenKind::Access) {
        TokenState::Accepted(claims) => {
            assert_eq!(claims.email, "a@x.com");
            assert_eq!(claims.exp - claims.iat, 24 * 3600);
        }
        other => panic!("expected Accepted, got {other:?}"),
    }

    ctx.clock.advance(Duration::hours(23));
    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    ctx.clock.advance(Duration::hours(2));
    assert!(matches!(
        ctx.state.validator.inspect(&token, TokenKind::Access),
        TokenState::Expired(_)
    ));

    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_EXPIRED_JWT").await;
}

#[actix_web::test]
async fn token_signed_with_other_secret_is_bad_signature() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;

    let clock: SharedClock = ctx.clock.clone();
    let foreign = TokenIssuer::new(&SecurityConfig::new("someone-elses-secret").unwrap(), clock);
    let session = signup(&app, "forger@x.com").await;
    let identity = ctx
        .state
        .users
        .find_by_email("forger@x.com")
        .await
        .unwrap()
        .unwrap()
        .identity();
    assert_eq!(session["userId"], identity.subject_id);
    let forged = foreign.issue(&identity).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&forged.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_BAD_SIGNATURE").await;
}
