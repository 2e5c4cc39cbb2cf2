//! Public key publication

use axum::{extract::State, Json};
use courier_core::PublicKeyResponse;
use tracing::debug;

use crate::AppState;

/// `GET /rsa/public-key`
pub async fn public_key(State(state): State<AppState>) -> Json<PublicKeyResponse> {
    debug!("Serving server public key");
    Json(PublicKeyResponse {
        public_key: state.server_keys.public_key().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, SERVER_KEYS};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_public_key_is_stable_pem() {
        let (status, first) =
            send(Request::get("/rsa/public-key").body(Body::empty()).unwrap()).await;
        let (_, second) =
            send(Request::get("/rsa/public-key").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        let pem = first["publicKey"].as_str().unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        assert_eq!(pem, SERVER_KEYS.public_key());
        assert_eq!(first, second);
    }
}
