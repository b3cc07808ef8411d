//! Mason hypermedia documents.
//!
//! A [`MasonDocument`] is a JSON object carrying resource fields plus the
//! reserved `@namespaces`, `@controls` and `@error` properties. Handlers
//! build one per response and return it directly; it renders with the
//! `application/vnd.mason+json` media type.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Mason media type.
pub const MASON: &str = "application/vnd.mason+json";

/// Prefix used for the service's own link relations.
pub const NAMESPACE: &str = "gss";

/// Where the `gss` link relations are documented.
pub const LINK_RELATIONS_URL: &str = "/gamescoreservice/link-relations/";

/// A single hypermedia control.
///
/// # Examples
/// ```
/// use gamescoreservice::inbound::http::mason::Control;
///
/// let control = Control::new("/api/players/").method("GET").title("List all players");
/// assert_eq!(control.href, "/api/players/");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Control {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
            title: None,
            encoding: None,
            schema: None,
        }
    }

    #[must_use]
    pub fn method(mut self, method: &'static str) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Declare a JSON request body validated against `schema`.
    #[must_use]
    pub fn json_body(mut self, schema: Value) -> Self {
        self.encoding = Some("json");
        self.schema = Some(schema);
        self
    }
}

/// Mason object under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasonDocument {
    body: Map<String, Value>,
    status: Option<StatusCode>,
}

impl MasonDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain resource field.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.body.insert(name.to_owned(), value.into());
        self
    }

    /// Declare the `gss` namespace.
    #[must_use]
    pub fn with_namespace(mut self) -> Self {
        self.body.insert(
            "@namespaces".to_owned(),
            json!({ NAMESPACE: { "name": LINK_RELATIONS_URL } }),
        );
        self
    }

    /// Add (or replace) a named control.
    #[must_use]
    pub fn control(mut self, name: &str, control: Control) -> Self {
        let controls = self
            .body
            .entry("@controls")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = controls {
            map.insert(name.to_owned(), json!(control));
        }
        self
    }

    /// Set the `items` array.
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = Self>) -> Self {
        let items: Vec<Value> = items.into_iter().map(Self::into_value).collect();
        self.body.insert("items".to_owned(), Value::Array(items));
        self
    }

    /// Set the `@error` object.
    #[must_use]
    pub fn error(mut self, error: Value) -> Self {
        self.body.insert("@error".to_owned(), error);
        self
    }

    /// Override the response status (defaults to `200 OK`).
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    pub fn into_response(self) -> HttpResponse {
        let status = self.status.unwrap_or(StatusCode::OK);
        HttpResponse::build(status)
            .content_type(MASON)
            .json(self.into_value())
    }
}

impl Responder for MasonDocument {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into_response()
    }
}
