//! API entry point: the hypermedia root clients start navigating from.

use actix_web::get;

use super::hypermedia::{entry_href, games_all, players_all};
use super::mason::{Control, MasonDocument};
use super::schemas::MasonDocumentSchema;

/// Entry point exposing the top-level collections.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use gamescoreservice::inbound::http::entry::entry_point;
///
/// let _app = App::new().service(web::scope("/api").service(entry_point));
/// ```
#[utoipa::path(
    get,
    path = "/api/",
    responses(
        (status = 200, description = "Entry point", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json")
    ),
    tags = ["navigation"],
    operation_id = "entryPoint"
)]
#[get("/")]
pub async fn entry_point() -> MasonDocument {
    MasonDocument::new()
        .with_namespace()
        .control("self", Control::new(entry_href()))
        .control("gss:players-all", players_all())
        .control("gss:games-all", games_all())
}
