use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::notes;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

async fn search(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let hits = notes::search(&app_state, &current_user, &query.q).await?;
    Ok(HttpResponse::Ok().json(hits))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(search));
}
