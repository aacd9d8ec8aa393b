//! HTTP mapping for domain errors.
//!
//! Keeps the domain free of transport concerns: the status code, the
//! trace-id response header, and internal-error redaction all live here.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id));
        }
        if matches!(self.code(), ErrorCode::InternalError) {
            // Internal messages can leak backend detail; clients get a
            // generic envelope, logs keep the original.
            let mut redacted = Error::new(ErrorCode::InternalError, "Internal server error");
            if let Some(id) = self.trace_id() {
                redacted = redacted.with_trace_id(id.to_owned());
            }
            return builder.json(redacted);
        }
        builder.json(self)
    }
}
