//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every Mason endpoint of the inbound HTTP layer
//! together with the request bodies and the schema wrappers describing
//! Mason documents. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::games::GameRequest;
use crate::inbound::http::levels::LevelRequest;
use crate::inbound::http::players::PlayerRequest;
use crate::inbound::http::schemas::{
    ControlSchema, ErrorBodySchema, MasonDocumentSchema, MasonErrorSchema,
};
use crate::inbound::http::scores::ScoreRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GameScoreService API",
        description = "Hypermedia (Mason) API for players, games, levels and scores."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::entry::entry_point,
        crate::inbound::http::players::list_players,
        crate::inbound::http::players::create_player,
        crate::inbound::http::players::get_player,
        crate::inbound::http::players::replace_player,
        crate::inbound::http::players::delete_player,
        crate::inbound::http::players::list_scores_by,
        crate::inbound::http::games::list_games,
        crate::inbound::http::games::create_game,
        crate::inbound::http::games::get_game,
        crate::inbound::http::games::replace_game,
        crate::inbound::http::games::create_level,
        crate::inbound::http::games::delete_game,
        crate::inbound::http::levels::get_level,
        crate::inbound::http::levels::replace_level,
        crate::inbound::http::levels::submit_score,
        crate::inbound::http::levels::delete_level,
        crate::inbound::http::scores::get_score,
        crate::inbound::http::scores::replace_score,
        crate::inbound::http::scores::delete_score,
        crate::inbound::http::relations::link_relations,
        crate::inbound::http::relations::profile,
    ),
    components(schemas(
        PlayerRequest,
        GameRequest,
        LevelRequest,
        ScoreRequest,
        ControlSchema,
        ErrorBodySchema,
        ErrorCode,
        MasonDocumentSchema,
        MasonErrorSchema,
    )),
    tags(
        (name = "navigation", description = "Entry point and documentation links"),
        (name = "players", description = "Registered players and their scores"),
        (name = "games", description = "Games and their metadata"),
        (name = "levels", description = "Levels within a game and their leaderboards"),
        (name = "scores", description = "Individual scores")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/")]
    #[case("/api/players/")]
    #[case("/api/players/{player}/")]
    #[case("/api/players/{player}/scores/")]
    #[case("/api/games/")]
    #[case("/api/games/{game}/")]
    #[case("/api/games/{game}/{level}/")]
    #[case("/api/games/{game}/{level}/{player}/")]
    #[case("/profiles/{profile}/")]
    fn every_resource_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn game_item_documents_every_method() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/games/{game}/").expect("game path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("ErrorBodySchema", "@message")]
    #[case("ErrorBodySchema", "@code")]
    #[case("MasonErrorSchema", "@error")]
    #[case("MasonDocumentSchema", "@controls")]
    #[case("LevelRequest", "type")]
    #[case("ScoreRequest", "password")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(schema).expect("schema"), field);
    }
}
