//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use serde_json::Value;

use crate::test_support::{InMemoryScoreboard, fixed_clock};

use super::state::{HttpState, Repositories};

/// Handler state backed by `store` with the clock frozen at the fixture
/// instant.
pub fn state_over(store: Arc<InMemoryScoreboard>) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        Repositories {
            players: store.clone(),
            games: store.clone(),
            levels: store.clone(),
            scores: store,
        },
        fixed_clock(),
    ))
}

/// State over the `populate-db` sample dataset.
pub fn seeded_state() -> web::Data<HttpState> {
    state_over(Arc::new(InMemoryScoreboard::seeded()))
}

/// Read a response body as JSON.
pub async fn json_body<B>(res: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// `Location` header of a response.
pub fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}
