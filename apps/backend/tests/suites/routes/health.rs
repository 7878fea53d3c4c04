use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;

use crate::common::json_body;
use crate::support::auth::{access_token, bearer, signup};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_tracked_principals() {
    let ctx = build_test_state();
    let app = create_test_app(ctx.state.clone()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["time"], "2030-06-01T12:00:00Z");
    assert_eq!(body["principals_tracked"], 0);

    let token = access_token(&signup(&app, &unique_email("health")).await);
    let req = test::TestRequest::get()
        .uri("/api/notes")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["principals_tracked"], 1);
}
