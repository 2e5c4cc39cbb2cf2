//! Responder port used by the client-side orchestrator

use crate::{Envelope, MessageResponse, TransportError};
use async_trait::async_trait;

/// What the responder said about a submitted envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(MessageResponse),
    Rejected { status: u16, error: String },
}

/// Key distribution and envelope submission, as seen from the client.
///
/// Submission is split in two so the orchestrator can tell "still sending"
/// apart from "sent, awaiting the reply".
#[async_trait]
pub trait PeerEndpoint: Send + Sync {
    /// Handle for a request already on the wire
    type Pending: Send;

    /// Fetch the responder's current SPKI PEM public key
    async fn fetch_public_key(&self) -> Result<String, TransportError>;

    /// Transmit a complete envelope
    async fn submit(&self, envelope: &Envelope) -> Result<Self::Pending, TransportError>;

    /// Wait for and decode the reply to a submitted envelope
    async fn receive(&self, pending: Self::Pending) -> Result<SubmitOutcome, TransportError>;
}
