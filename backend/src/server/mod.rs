//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use gamescoreservice::inbound::http::router::app;
use gamescoreservice::inbound::http::state::{HttpState, Repositories};
use gamescoreservice::outbound::persistence::{
    DbPool, DieselGameRepository, DieselLevelRepository, DieselPlayerRepository,
    DieselScoreRepository,
};
#[cfg(debug_assertions)]
use gamescoreservice::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Repositories {
            players: Arc::new(DieselPlayerRepository::new(pool.clone())),
            games: Arc::new(DieselGameRepository::new(pool.clone())),
            levels: Arc::new(DieselLevelRepository::new(pool.clone())),
            scores: Arc::new(DieselScoreRepository::new(pool.clone())),
        },
        Arc::new(DefaultClock),
    )
}

/// Construct an Actix HTTP server over the Diesel repositories.
///
/// Swagger UI is mounted at `/docs` in debug builds.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config.db_pool));
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        let app = app(http_state.clone());

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
