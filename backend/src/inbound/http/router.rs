//! Route table for the HTTP adapter.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpRequest, HttpResponse, ResponseError, Scope, web};
use tracing::debug;

use crate::domain::Error;
use crate::middleware::Trace;

use super::state::HttpState;
use super::validation::json_config;
use super::{entry, games, levels, players, relations, scores};

/// Every `/api/` resource.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .service(entry::entry_point)
        .service(players::list_players)
        .service(players::create_player)
        .service(players::list_scores_by)
        .service(players::get_player)
        .service(players::replace_player)
        .service(players::delete_player)
        .service(games::list_games)
        .service(games::create_game)
        .service(scores::get_score)
        .service(scores::replace_score)
        .service(scores::delete_score)
        .service(levels::get_level)
        .service(levels::replace_level)
        .service(levels::submit_score)
        .service(levels::delete_level)
        .service(games::get_game)
        .service(games::replace_game)
        .service(games::create_level)
        .service(games::delete_game)
}

/// Register the API scope plus the documentation redirects.
///
/// Pair with `App::default_service(web::to(route_not_found))` so unmatched
/// requests get a Mason error document.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_scope())
        .service(relations::link_relations)
        .service(relations::profile);
}

/// Fallback for paths (or methods) no resource handles.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "no matching route");
    Error::not_found(format!("No resource at '{}'.", req.path())).error_response()
}

/// Application with every route, the trace middleware and the Mason 404
/// fallback.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use gamescoreservice::inbound::http::router::app;
/// use gamescoreservice::inbound::http::state::{HttpState, Repositories};
/// use gamescoreservice::test_support::{InMemoryScoreboard, fixed_clock};
///
/// let store = Arc::new(InMemoryScoreboard::seeded());
/// let state = HttpState::from_repositories(
///     Repositories {
///         players: store.clone(),
///         games: store.clone(),
///         levels: store.clone(),
///         scores: store,
///     },
///     fixed_clock(),
/// );
/// let _app = app(web::Data::new(state));
/// ```
pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(route_not_found))
}
