use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

use crate::common::{assert_problem, json_body};
use crate::support::auth::{access_token, bearer, signup};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn search_matches_any_term_in_visible_notes() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let alice = access_token(&signup(&app, &unique_email("alice")).await);
    let bob = access_token(&signup(&app, &unique_email("bob")).await);

    for (token, header, data, sharable) in [
        (&alice, "Shopping", "Buy EGGS", false),
        (&bob, "Workout", "leg day", false),
        (&bob, "Breakfast", "eggs benedict", true),
        (&bob, "Taxes", "deadline", false),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/notes")
            .insert_header(bearer(token))
            .set_json(json!({ "header": header, "notesData": data, "sharable": sharable }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/search?q=eggs%20workout")
        .insert_header(bearer(&alice))
        .to_request();
    let hits = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    let mut headers: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["header"].as_str().unwrap())
        .collect();
    headers.sort_unstable();
    assert_eq!(headers, vec!["Breakfast", "Shopping"]);
}

#[actix_web::test]
async fn empty_query_is_rejected() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let token = access_token(&signup(&app, &unique_email("search")).await);

    for uri in ["/api/search", "/api/search?q=%20%20"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        assert_problem(
            test::call_service(&app, req).await,
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        )
        .await;
    }
}
