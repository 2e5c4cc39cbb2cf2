//! Envelope submission

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use courier_core::{protocol::responder, Envelope, MessageResponse, ResponderError};
use tracing::{info, warn};

use super::ApiError;
use crate::AppState;

/// `POST /message`
///
/// A body that does not parse as an envelope is treated the same as one with
/// every field missing.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Envelope>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(envelope) = payload.map_err(|rejection| {
        warn!("Unreadable message body: {}", rejection);
        ResponderError::MissingField(Envelope::default().missing_fields())
    })?;

    let message = responder::handle(&envelope, &state.server_keys)?;
    info!("Message accepted ({} bytes)", message.len());

    Ok(Json(MessageResponse { message }))
}
