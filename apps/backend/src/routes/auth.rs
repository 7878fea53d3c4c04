use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users::{self, Signup};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

async fn signup(
    app_state: web::Data<AppState>,
    body: ValidatedJson<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let session = users::signup(
        &app_state,
        Signup {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(session))
}

/// Same 401 for unknown email and wrong password.
async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let session = users::login(&app_state, &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(session))
}

async fn refresh(
    app_state: web::Data<AppState>,
    body: ValidatedJson<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    let session = users::refresh(&app_state, &body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(session))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup))
        .route("/login", web::post().to(login))
        .route("/refresh", web::post().to(refresh));
}
