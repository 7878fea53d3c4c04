use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use notes_backend::rate_limit::RateLimitConfig;
use time::Duration;

use crate::common::assert_problem;
use crate::support::auth::{access_token, bearer, signup};
use crate::support::create_test_app;
use crate::support::test_state::{build_test_state_with_limits, roomy_limits};

fn five_per_second() -> RateLimitConfig {
    RateLimitConfig::new(5, 1.0).unwrap()
}

fn list_notes(token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(token))
        .to_request()
}

#[actix_web::test]
async fn global_gate_limits_every_route() {
    let ctx = build_test_state_with_limits(five_per_second(), roomy_limits());
    let app = create_test_app(ctx.state.clone()).build().await;

    for _ in 0..5 {
        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/health").to_request();
    let problem = assert_problem(
        test::call_service(&app, req).await,
        StatusCode::TOO_MANY_REQUESTS,
        "RATE_LIMIT_EXCEEDED",
    )
    .await;
    assert!(problem.detail.starts_with("Server is receiving"), "{}", problem.detail);

    // Unauthenticated routes share the same bucket.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({ "email": "a@x.com", "password": "whatever1" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    ctx.clock.advance(Duration::seconds(1));
    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[actix_web::test]
async fn principal_buckets_are_isolated() {
    let ctx = build_test_state_with_limits(roomy_limits(), five_per_second());
    let app = create_test_app(ctx.state.clone()).build().await;
    let alice = access_token(&signup(&app, &unique_email("alice")).await);
    let bob = access_token(&signup(&app, &unique_email("bob")).await);

    for _ in 0..5 {
        let resp = test::call_service(&app, list_notes(&alice)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let problem = assert_problem(
        test::call_service(&app, list_notes(&alice)).await,
        StatusCode::TOO_MANY_REQUESTS,
        "RATE_LIMIT_EXCEEDED",
    )
    .await;
    assert!(problem.detail.contains("this account"), "{}", problem.detail);

    // Bob is unaffected by Alice's exhaustion.
    for _ in 0..5 {
        let resp = test::call_service(&app, list_notes(&bob)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // One simulated second buys exactly one more request.
    ctx.clock.advance(Duration::seconds(1));
    assert_eq!(
        test::call_service(&app, list_notes(&alice)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        test::call_service(&app, list_notes(&alice)).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[actix_web::test]
async fn unauthenticated_requests_do_not_create_buckets() {
    let ctx = build_test_state_with_limits(roomy_limits(), five_per_second());
    let app = create_test_app(ctx.state.clone()).build().await;

    for _ in 0..10 {
        let req = test::TestRequest::get().uri("/api/notes").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
    assert!(ctx.state.rate_limits.principals.is_empty());
}

#[actix_web::test]
async fn evicted_principal_starts_with_full_bucket() {
    let ctx = build_test_state_with_limits(roomy_limits(), five_per_second());
    let app = create_test_app(ctx.state.clone()).build().await;
    let token = access_token(&signup(&app, &unique_email("evict")).await);

    for _ in 0..5 {
        test::call_service(&app, list_notes(&token)).await;
    }
    assert_eq!(ctx.state.rate_limits.principals.len(), 1);

    ctx.clock.advance(Duration::minutes(11));
    let evicted = ctx
        .state
        .rate_limits
        .principals
        .evict_idle(Duration::minutes(10));
    assert_eq!(evicted, 1);
    assert!(ctx.state.rate_limits.principals.is_empty());

    for _ in 0..5 {
        let resp = test::call_service(&app, list_notes(&token)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert_eq!(ctx.state.rate_limits.principals.created_total(), 2);
}
