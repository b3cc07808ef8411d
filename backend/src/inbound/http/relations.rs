//! Redirects from link-relation and profile URIs to the published API
//! documentation.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, web};
use tracing::debug;

use super::hypermedia::API_DOCS_URL;

fn redirect(section: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, format!("{API_DOCS_URL}{section}")))
        .finish()
}

/// Documentation of the `gss` link relations.
#[utoipa::path(
    get,
    path = "/gamescoreservice/link-relations/",
    responses((status = 302, description = "Redirect to the link relation documentation")),
    tags = ["navigation"],
    operation_id = "linkRelations"
)]
#[get("/gamescoreservice/link-relations/")]
pub async fn link_relations() -> HttpResponse {
    redirect("link-relations")
}

/// Documentation of a resource profile.
#[utoipa::path(
    get,
    path = "/profiles/{profile}/",
    params(("profile" = String, Path, description = "Profile name")),
    responses((status = 302, description = "Redirect to the profile documentation")),
    tags = ["navigation"],
    operation_id = "profile"
)]
#[get("/profiles/{profile}/")]
pub async fn profile(path: web::Path<String>) -> HttpResponse {
    debug!(profile = %path, "profile documentation requested");
    redirect("profiles")
}
