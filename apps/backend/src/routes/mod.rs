use actix_web::web;

use crate::middleware::{Authenticate, RateLimit};

pub mod auth;
pub mod health;
pub mod notes;
pub mod search;

/// Register every route. Used by `main.rs` and by the integration tests.
///
/// Protected scopes authenticate first, then draw from the caller's own
/// bucket. The global gate and request tracing are wrapped around the whole
/// `App` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Account routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Notes: /api/notes/**
    cfg.service(
        web::scope("/api/notes")
            .wrap(RateLimit::PerPrincipal)
            .wrap(Authenticate)
            .configure(notes::configure_routes),
    );

    // Search: /api/search
    cfg.service(
        web::scope("/api/search")
            .wrap(RateLimit::PerPrincipal)
            .wrap(Authenticate)
            .configure(search::configure_routes),
    );
}
