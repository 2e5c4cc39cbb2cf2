//! Request handlers

pub mod health;
pub mod keys;
pub mod message;

pub use health::health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courier_core::{ErrorResponse, ResponderError};
use tracing::warn;

/// Handler error carrying the responder outcome.
///
/// Only the fixed public message reaches the client; the detailed cause is
/// logged.
#[derive(Debug)]
pub struct ApiError(pub ResponderError);

impl From<ResponderError> for ApiError {
    fn from(err: ResponderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!("Rejecting message with {}: {}", status, self.0);
        (status, Json(ErrorResponse::new(self.0.public_message()))).into_response()
    }
}
