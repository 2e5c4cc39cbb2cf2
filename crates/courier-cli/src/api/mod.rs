//! HTTP transport for the Courier server

use async_trait::async_trait;
use courier_core::{
    Envelope, ErrorResponse, MessageResponse, PeerEndpoint, PublicKeyResponse, SubmitOutcome,
    TransportError,
};
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// `PeerEndpoint` backed by the server's HTTP routes
pub struct HttpEndpoint {
    http: ReqwestClient,
    base_url: String,
}

impl HttpEndpoint {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PeerEndpoint for HttpEndpoint {
    type Pending = Response;

    async fn fetch_public_key(&self) -> Result<String, TransportError> {
        let url = self.url("/rsa/public-key");
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(format!(
                "Public key request failed with status {}",
                status
            )));
        }

        let body: PublicKeyResponse = response.json().await.map_err(transport)?;
        Ok(body.public_key)
    }

    async fn submit(&self, envelope: &Envelope) -> Result<Response, TransportError> {
        let url = self.url("/message");
        debug!("POST {}", url);

        self.http
            .post(&url)
            .json(envelope)
            .send()
            .await
            .map_err(transport)
    }

    async fn receive(&self, response: Response) -> Result<SubmitOutcome, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        interpret(status, &body)
    }
}

fn transport(err: reqwest::Error) -> TransportError {
    TransportError::new(err.to_string())
}

/// Classify a `POST /message` response.
///
/// A failure status counts as a rejection only when the body carries the
/// server's `{ "error": .. }` shape; anything else is a transport fault.
fn interpret(status: StatusCode, body: &str) -> Result<SubmitOutcome, TransportError> {
    if status.is_success() {
        let response: MessageResponse = serde_json::from_str(body)
            .map_err(|e| TransportError::new(format!("Malformed response body: {}", e)))?;
        return Ok(SubmitOutcome::Accepted(response));
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(rejection) => Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            error: rejection.error,
        }),
        Err(_) => Err(TransportError::new(format!(
            "Server returned {} without an error body",
            status
        ))),
    }
}
