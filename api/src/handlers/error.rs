//! Mapping of domain errors to HTTP responses
//!
//! Credential failures of every kind collapse into one 401 body so that a
//! client cannot tell an expired token from a forged or reused one.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use fl_core::errors::{DomainError, TokenError};
use fl_shared::errors::{error_codes, ErrorResponse};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    if error.is_credential_failure() {
        match error {
            DomainError::Token(token_error) => {
                log::debug!("Credential rejected: {}", token_error.code())
            }
            _ => log::debug!("Credential rejected: {}", error),
        }
        return HttpResponse::Unauthorized().json(ErrorResponse::unauthorized());
    }

    match error {
        DomainError::Token(TokenError::MissingIdentity { field }) => {
            log::warn!("Rejected request with empty identity field {}", field);
            HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::BAD_REQUEST, "Missing identity field")
                    .add_detail("field", field),
            )
        }
        DomainError::Validation { message } => {
            log::warn!("Validation error: {}", message);
            HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message.as_str()))
        }
        DomainError::Unavailable { message } => {
            log::warn!("Store unavailable: {}", message);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable, please retry",
            ))
        }
        other => {
            log::error!("Domain Error: {:?}", other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response for request bodies that fail validation
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::BAD_REQUEST, "Invalid request body");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(response)
}

/// JSON extractor error handler producing the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Malformed JSON body",
    ));
    InternalError::from_response(err, response).into()
}
