//! OpenAPI schema definitions for Mason documents.
//!
//! Responses are assembled dynamically by [`super::mason::MasonDocument`],
//! so these wrappers describe their shape for the generated API document
//! only.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// OpenAPI schema for a Mason control.
#[derive(Serialize, ToSchema)]
pub struct ControlSchema {
    /// Target URI.
    #[schema(example = "/api/players/")]
    pub href: String,
    /// HTTP method, `GET` when absent.
    #[schema(example = "POST")]
    pub method: Option<String>,
    pub title: Option<String>,
    /// `json` for controls that accept a body.
    pub encoding: Option<String>,
    /// JSON Schema of the accepted body.
    pub schema: Option<Value>,
}

/// OpenAPI schema for the `@error` object.
#[derive(Serialize, ToSchema)]
pub struct ErrorBodySchema {
    /// Short title of the failure category.
    #[serde(rename = "@message")]
    #[schema(example = "Not found")]
    pub message: String,
    /// Specific description of what went wrong.
    #[serde(rename = "@messages")]
    pub messages: Vec<String>,
    #[serde(rename = "@code")]
    pub code: ErrorCode,
    /// Trace identifier of the failed request.
    #[serde(rename = "@id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
}

/// OpenAPI schema for Mason error documents.
#[derive(Serialize, ToSchema)]
pub struct MasonErrorSchema {
    #[serde(rename = "@error")]
    pub error: ErrorBodySchema,
    /// Contains a `profile` control pointing at `/profiles/error/`.
    #[serde(rename = "@controls")]
    pub controls: std::collections::BTreeMap<String, ControlSchema>,
    /// Offending field, validation code and value for rejected payloads.
    pub details: Option<Value>,
}

/// OpenAPI schema for Mason resource documents.
#[derive(Serialize, ToSchema)]
pub struct MasonDocumentSchema {
    #[serde(rename = "@namespaces")]
    pub namespaces: Option<Value>,
    #[serde(rename = "@controls")]
    pub controls: std::collections::BTreeMap<String, ControlSchema>,
    /// Member representations of a collection.
    pub items: Option<Vec<Value>>,
}
