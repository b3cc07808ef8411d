//! HTTP inbound adapter exposing the Mason REST API.

pub mod entry;
pub mod error;
pub mod games;
pub mod hypermedia;
pub mod levels;
pub mod mason;
pub mod players;
pub mod relations;
pub mod router;
pub mod schemas;
pub mod scores;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
