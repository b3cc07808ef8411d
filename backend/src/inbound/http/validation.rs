//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field produces an `invalid_request` error whose details
//! name the field, a stable code and, when present, the offending value.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldError};

/// Largest accepted request body.
const PAYLOAD_LIMIT: usize = 16 * 1024;

/// Validation error codes raised by the adapter itself rather than the
/// domain value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdapterCode {
    MissingField,
    MalformedJson,
}

impl AdapterCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::MalformedJson => "malformed_json",
        }
    }
}

/// Newtype wrapper for payload field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": AdapterCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_field_error(field: FieldName, error: &FieldError, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} {error}")).with_details(json!({
        "field": field,
        "code": error.code(),
        "value": value,
    }))
}

/// Unwrap a required field.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate `value` with `parse`, reporting failures against `field`.
pub(crate) fn parse_field<T>(
    value: &str,
    field: FieldName,
    parse: impl FnOnce(&str) -> Result<T, FieldError>,
) -> Result<T, Error> {
    parse(value).map_err(|err| invalid_field_error(field, &err, value))
}

/// Convert a JSON extractor failure into a domain error.
///
/// Missing or non-JSON content types map to `unsupported_media_type`;
/// anything that fails to parse or type-check maps to `invalid_request`.
pub(crate) fn json_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => Error::unsupported_media_type("Requests must be JSON"),
        other => Error::invalid_request(other.to_string()).with_details(json!({
            "code": AdapterCode::MalformedJson.as_str(),
        })),
    }
}

/// JSON extractor configuration shared by every write endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(PAYLOAD_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            debug!(path = req.path(), error = %err, "rejected request payload");
            json_error(&err).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ResourceName};
    use rstest::rstest;

    const NAME: FieldName = FieldName::new("name");

    #[rstest]
    fn missing_fields_name_the_field() {
        let err = required::<String>(None, NAME).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "name", "code": "missing_field" }))
        );
    }

    #[rstest]
    fn invalid_fields_echo_the_value() {
        let err = parse_field("bad/name", NAME, |v| ResourceName::new(v))
            .expect_err("slash rejected");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "invalid_characters");
        assert_eq!(details["value"], "bad/name");
    }

    #[rstest]
    fn content_type_errors_are_unsupported_media_type() {
        let err = json_error(&JsonPayloadError::ContentType);
        assert_eq!(err.code(), ErrorCode::UnsupportedMediaType);
    }

    #[rstest]
    fn overflow_is_invalid_request() {
        let err = json_error(&JsonPayloadError::Overflow { limit: 1 });
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
