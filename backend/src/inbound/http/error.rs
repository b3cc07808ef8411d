//! HTTP adapter mapping for domain errors.
//!
//! Domain errors render as Mason error documents: a short title in
//! `@error.@message`, the specific message in `@error.@messages`, the stable
//! code and trace identifier, and a `profile` control pointing at the error
//! profile.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::hypermedia::Profile;
use super::mason::MasonDocument;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Short title shown in `@error.@message`.
fn title_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Invalid JSON document",
        ErrorCode::Unauthorized => "Unauthorized",
        ErrorCode::Forbidden => "Forbidden",
        ErrorCode::NotFound => "Not found",
        ErrorCode::Conflict => "Already exists",
        ErrorCode::UnsupportedMediaType => "Unsupported media type",
        ErrorCode::ServiceUnavailable => "Service unavailable",
        ErrorCode::InternalError => INTERNAL_MESSAGE,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

/// Mason representation of `error` as sent to clients.
pub fn error_document(error: &Error) -> MasonDocument {
    let visible = redact_if_internal(error);
    let mut body = json!({
        "@message": title_for(visible.code()),
        "@messages": [visible.message()],
        "@code": visible.code(),
    });
    if let Some(id) = visible.trace_id() {
        body["@id"] = json!(id);
    }
    let document = MasonDocument::new()
        .error(body)
        .control("profile", Profile::Error.control());
    match visible.details() {
        Some(details) => document.field("details", details.clone()),
        None => document,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut response = error_document(self)
            .with_status(self.status_code())
            .into_response();
        if let Some(id) = self.trace_id() {
            if let Ok(value) = HeaderValue::from_str(id) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
        }
        response
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_MESSAGE)
    }
}
