use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::ValidatedJson;
use crate::services::notes::{self, NewNote, NoteChanges};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub header: String,
    #[serde(default)]
    pub notes_data: String,
    #[serde(default)]
    pub sharable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub notes_data: Option<String>,
    #[serde(default)]
    pub sharable: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareNoteRequest {
    pub user_id: String,
}

async fn list_notes(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let notes = notes::list(&app_state, &current_user).await?;
    Ok(HttpResponse::Ok().json(notes))
}

async fn get_note(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let note = notes::get(&app_state, &current_user, &path).await?;
    Ok(HttpResponse::Ok().json(note))
}

async fn create_note(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let note = notes::create(
        &app_state,
        &current_user,
        NewNote {
            header: body.header,
            notes_data: body.notes_data,
            sharable: body.sharable,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(note))
}

async fn update_note(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<UpdateNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let changes = NoteChanges {
        header: body.header,
        notes_data: body.notes_data,
        sharable: body.sharable,
    };
    let note = notes::update(&app_state, &current_user, &path, changes).await?;
    Ok(HttpResponse::Ok().json(note))
}

async fn delete_note(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let note = notes::delete(&app_state, &current_user, &path).await?;
    Ok(HttpResponse::Ok().json(note))
}

async fn share_note(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<ShareNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let copy = notes::share(&app_state, &current_user, &path, &body.user_id).await?;
    Ok(HttpResponse::Created().json(copy))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_note))
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note)),
    )
    .service(web::resource("/{id}/share").route(web::post().to(share_note)));
}
