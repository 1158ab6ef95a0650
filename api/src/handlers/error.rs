//! Translation of domain errors into HTTP responses
//!
//! Every failing request answers with the same envelope:
//! `{"error": {"type": "<CODE>", "message": "<text>"}}`.

use std::fmt;

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use validator::ValidationErrors;

use acct_core::errors::DomainError;
use acct_shared::ErrorResponse;

/// Error type returned by handlers, middleware and extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        Self(DomainError::validation(format!(
            "invalid request parameters: {}",
            fields.join(", ")
        )))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

fn status_for(error: &DomainError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Build the error response for a domain error
///
/// Internal details were logged where they were translated; only the
/// public message reaches the body.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), error = %error, "Request failed");
    } else {
        tracing::debug!(status = status.as_u16(), error = %error, "Request rejected");
    }

    HttpResponse::build(status).json(ErrorResponse::new(error.error_code(), error.public_message()))
}

/// Error handler for `web::JsonConfig`, so malformed bodies use the common envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            DomainError::PayloadTooLarge { max_bytes: *limit }
        }
        other => DomainError::validation(format!("invalid request body: {}", other)),
    };
    ApiError(error).into()
}
