//! Inbound adapters translating external requests into domain service calls.
//!
//! The Mason REST API lives under [`http`].

pub mod http;
