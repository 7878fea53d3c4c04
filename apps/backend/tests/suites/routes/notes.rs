use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};
use time::Duration;

use crate::common::{assert_problem, json_body};
use crate::support::auth::{access_token, bearer, signup};
use crate::support::{build_test_state, create_test_app};

fn create(token: &str, body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/notes")
        .insert_header(bearer(token))
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn owner_crud_round() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let session = signup(&app, &unique_email("crud")).await;
    let token = access_token(&session);

    let note = json_body(
        test::call_service(
            &app,
            create(&token, json!({ "header": "Groceries", "notesData": "milk" })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = note["id"].as_str().unwrap().to_string();
    assert_eq!(note["ownerId"], session["userId"]);
    assert_eq!(note["email"], session["email"]);
    assert_eq!(note["sharable"], false);

    ctx.clock.advance(Duration::minutes(5));
    let req = test::TestRequest::put()
        .uri(&format!("/api/notes/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "notesData": "milk, eggs" }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(updated["header"], "Groceries");
    assert_eq!(updated["notesData"], "milk, eggs");
    assert_ne!(updated["updatedAt"], note["updatedAt"]);
    assert_eq!(updated["createdAt"], note["createdAt"]);

    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&token))
        .to_request();
    let list = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/notes/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let removed = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(removed["id"], id.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/notes/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "NOTE_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn create_validation_and_header_conflict() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let token = access_token(&signup(&app, &unique_email("conflict")).await);

    let resp = test::call_service(&app, create(&token, json!({ "header": "  " }))).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let resp = test::call_service(&app, create(&token, json!({ "header": "Plan" }))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = test::call_service(&app, create(&token, json!({ "header": "Plan" }))).await;
    assert_problem(resp, StatusCode::CONFLICT, "NOTE_HEADER_CONFLICT").await;
}

#[actix_web::test]
async fn visibility_and_ownership_rules() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let alice = access_token(&signup(&app, &unique_email("alice")).await);
    let bob = access_token(&signup(&app, &unique_email("bob")).await);

    let private = json_body(
        test::call_service(&app, create(&alice, json!({ "header": "Diary" }))).await,
        StatusCode::CREATED,
    )
    .await;
    let public = json_body(
        test::call_service(
            &app,
            create(&alice, json!({ "header": "Recipes", "sharable": true })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    // Bob sees only the sharable note.
    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&bob))
        .to_request();
    let list = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![public["id"].as_str().unwrap()]);

    let private_uri = format!("/api/notes/{}", private["id"].as_str().unwrap());
    let public_uri = format!("/api/notes/{}", public["id"].as_str().unwrap());

    let req = test::TestRequest::get()
        .uri(&private_uri)
        .insert_header(bearer(&bob))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::FORBIDDEN,
        "NOTE_ACCESS_DENIED",
    )
    .await;

    // Readable is not writable.
    let req = test::TestRequest::put()
        .uri(&public_uri)
        .insert_header(bearer(&bob))
        .set_json(json!({ "header": "Mine now" }))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::FORBIDDEN,
        "NOTE_ACCESS_DENIED",
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&public_uri)
        .insert_header(bearer(&bob))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::FORBIDDEN,
        "NOTE_ACCESS_DENIED",
    )
    .await;
}

#[actix_web::test]
async fn share_creates_private_copy_for_target() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;
    let alice = access_token(&signup(&app, &unique_email("alice")).await);
    let bob_session = signup(&app, &unique_email("bob")).await;
    let bob = access_token(&bob_session);

    let note = json_body(
        test::call_service(&app, create(&alice, json!({ "header": "Trip", "notesData": "Lisbon" })))
            .await,
        StatusCode::CREATED,
    )
    .await;
    let share_uri = format!("/api/notes/{}/share", note["id"].as_str().unwrap());

    let req = test::TestRequest::post()
        .uri(&share_uri)
        .insert_header(bearer(&alice))
        .set_json(json!({ "userId": bob_session["userId"] }))
        .to_request();
    let copy = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_ne!(copy["id"], note["id"]);
    assert_eq!(copy["ownerId"], bob_session["userId"]);
    assert_eq!(copy["email"], bob_session["email"]);
    assert_eq!(copy["notesData"], "Lisbon");
    assert_eq!(copy["sharable"], false);

    let req = test::TestRequest::get()
        .uri(&format!("/api/notes/{}", copy["id"].as_str().unwrap()))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&share_uri)
        .insert_header(bearer(&alice))
        .set_json(json!({ "userId": "no-such-user" }))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
    )
    .await;
}
