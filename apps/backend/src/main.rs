use actix_web::{web, App, HttpServer};
use notes_backend::config::AppConfig;
use notes_backend::infra::state::StateBuilder;
use notes_backend::middleware::{RateLimit, RequestTrace, StructuredLogger, TraceSpan};
use notes_backend::routes;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match StateBuilder::from_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    if let (Some(ttl), Some(period)) = (config.rate_limit_idle_ttl, config.eviction_period()) {
        let principals = app_state.rate_limits.principals.clone();
        let max_idle = match time::Duration::try_from(ttl) {
            Ok(max_idle) => max_idle,
            Err(e) => {
                eprintln!("❌ RATE_LIMIT_IDLE_TTL_SECS out of range: {e}");
                std::process::exit(1);
            }
        };
        actix_web::rt::spawn(async move {
            let mut ticker = actix_web::rt::time::interval(period);
            loop {
                ticker.tick().await;
                principals.evict_idle(max_idle);
            }
        });
    }

    tracing::info!(host = %config.host, port = config.port, "starting notes backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RateLimit::Global)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
