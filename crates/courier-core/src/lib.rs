//! Courier Core Library
//!
//! The one-shot hybrid-encryption exchange: a client seals a text message
//! under a fresh AES-256 key, wraps that key for the responder with RSA-OAEP,
//! signs the ciphertext with a freshly minted RSA key, and the responder
//! reverses those steps before releasing the plaintext.
//!
//! The message cipher is AES-256-CBC without a MAC. Ciphertext is malleable,
//! and the distinct responses for padding failures and signature failures
//! make the responder usable as a padding oracle. The per-message client key
//! pair proves possession of a signing key, not who the sender is.

// Re-export pure types from courier-types
pub use courier_types::*;

pub mod crypto;
pub mod error;
pub mod ports;
pub mod protocol;

pub use crypto::{
    AsymmetricCipher, EncryptedPayload, KeyPairGenerator, SignatureEngine, SymmetricCipher,
    SymmetricKey,
};
pub use error::{CryptoError, ExchangeError, ResponderError, Result, TransportError};
pub use ports::{PeerEndpoint, SubmitOutcome};
pub use protocol::{ExchangeState, Orchestrator, DEFAULT_TIMEOUT};
