//! Error types for Courier

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Failures of the individual crypto components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Key unwrap error: {0}")]
    KeyUnwrap(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

/// The closed set of ways a responder can refuse an envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("Key unwrap failed: {0}")]
    KeyUnwrap(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Invalid signature")]
    Signature,
}

impl ResponderError {
    /// HTTP status reported to the client
    pub fn status_code(&self) -> u16 {
        match self {
            ResponderError::MissingField(_) | ResponderError::Signature => 400,
            ResponderError::KeyUnwrap(_) | ResponderError::Decryption(_) => 500,
        }
    }

    /// Message placed in the `{ "error": .. }` body. Internal detail stays in logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ResponderError::MissingField(_) => "Missing required fields",
            ResponderError::Signature => "Invalid signature",
            ResponderError::KeyUnwrap(_) | ResponderError::Decryption(_) => {
                "Decryption or verification failed"
            }
        }
    }
}

/// Transport failure reported by a [`crate::PeerEndpoint`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a client-side exchange ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rejected by responder ({status}): {error}")]
    Rejected { status: u16, error: String },

    #[error("An exchange is already in flight")]
    Busy,

    #[error("Exchange cancelled")]
    Cancelled,
}

impl ExchangeError {
    /// Whether a caller may retry. Only transport-level failures qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExchangeError::Transport(_) | ExchangeError::Timeout(_))
    }
}

impl From<TransportError> for ExchangeError {
    fn from(e: TransportError) -> Self {
        ExchangeError::Transport(e.0)
    }
}
