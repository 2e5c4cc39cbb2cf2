//! Client-side exchange driver
//!
//! One exchange at a time per instance. A call made while another is in
//! flight is rejected with [`ExchangeError::Busy`] and leaves the running
//! exchange untouched.

use crate::crypto::{
    AsymmetricCipher, KeyPairGenerator, SignatureEngine, SymmetricCipher, SymmetricKey,
};
use crate::{
    CryptoError, Envelope, ExchangeError, KeyPair, PeerEndpoint, SubmitOutcome, TransportError,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bound on each network step
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where an exchange currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    FetchingPeerKey,
    Encrypting,
    Sending,
    AwaitingResponse,
    /// Carries the responder's recovered message
    Done(String),
    Failed(ExchangeError),
}

impl ExchangeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExchangeState::Done(_) | ExchangeState::Failed(_))
    }
}

pub struct Orchestrator<E> {
    endpoint: E,
    timeout: Duration,
    state: Mutex<ExchangeState>,
    in_flight: AtomicBool,
}

impl<E: PeerEndpoint> Orchestrator<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            state: Mutex::new(ExchangeState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn state(&self) -> ExchangeState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the full client sequence for one message and return the
    /// responder's reply.
    pub async fn exchange(&self, message: &str) -> Result<String, ExchangeError> {
        let guard = InFlight::acquire(&self.in_flight, &self.state)?;
        guard.set(ExchangeState::Idle);

        let result = self.run(&guard, message).await;
        match &result {
            Ok(reply) => {
                info!("Exchange complete");
                guard.set(ExchangeState::Done(reply.clone()));
            }
            Err(e) => {
                warn!("Exchange failed: {}", e);
                guard.set(ExchangeState::Failed(e.clone()));
            }
        }
        result
    }

    async fn run(&self, guard: &InFlight<'_>, message: &str) -> Result<String, ExchangeError> {
        guard.set(ExchangeState::FetchingPeerKey);
        info!("Fetching responder public key");
        let peer_public_key = self.bounded(self.endpoint.fetch_public_key()).await?;

        guard.set(ExchangeState::Encrypting);
        let envelope = seal_envelope(message, &peer_public_key).await?;

        guard.set(ExchangeState::Sending);
        info!("Submitting envelope");
        let pending = self.bounded(self.endpoint.submit(&envelope)).await?;
        drop(envelope);

        guard.set(ExchangeState::AwaitingResponse);
        match self.bounded(self.endpoint.receive(pending)).await? {
            SubmitOutcome::Accepted(response) => Ok(response.message),
            SubmitOutcome::Rejected { status, error } => {
                Err(ExchangeError::Rejected { status, error })
            }
        }
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, ExchangeError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(ExchangeError::from),
            Err(_) => Err(ExchangeError::Timeout(self.timeout)),
        }
    }
}

/// Build a complete envelope for `peer_public_key` without sending it.
///
/// Fresh AES key, encrypt, wrap, then a fresh client key pair to sign the
/// encrypted message string. The AES key is dropped as soon as it is wrapped.
pub async fn seal_envelope(message: &str, peer_public_key: &str) -> Result<Envelope, CryptoError> {
    let key = SymmetricKey::generate()?;
    let encrypted_message = SymmetricCipher::encrypt(message, &key)?.to_string();
    let encrypted_aes_key = AsymmetricCipher::wrap(&key, peer_public_key)?;
    drop(key);

    let client_keys = generate_key_pair().await?;
    let signature = SignatureEngine::sign(encrypted_message.as_bytes(), client_keys.private_key())?;
    debug!("Envelope sealed");

    Ok(Envelope::new(
        encrypted_message,
        encrypted_aes_key,
        signature,
        client_keys.public_key().to_string(),
    ))
}

async fn generate_key_pair() -> Result<KeyPair, CryptoError> {
    tokio::task::spawn_blocking(KeyPairGenerator::generate)
        .await
        .map_err(|e| CryptoError::KeyGeneration(format!("key generation task: {}", e)))?
}

/// Marks an exchange as running. Dropping it before a terminal state was
/// recorded (the exchange future was cancelled) records `Failed(Cancelled)`.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a Mutex<ExchangeState>,
}

impl<'a> InFlight<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a Mutex<ExchangeState>,
    ) -> Result<Self, ExchangeError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExchangeError::Busy)?;
        Ok(Self { flag, state })
    }

    fn set(&self, next: ExchangeState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Exchange state: {:?} -> {:?}", Phase(&*state), Phase(&next));
        *state = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.is_terminal() {
                warn!("Exchange cancelled in {:?}", Phase(&*state));
                *state = ExchangeState::Failed(ExchangeError::Cancelled);
            }
        }
        self.flag.store(false, Ordering::Release);
    }
}

/// State name only, so replies never reach the logs.
struct Phase<'a>(&'a ExchangeState);

impl std::fmt::Debug for Phase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            ExchangeState::Idle => "Idle",
            ExchangeState::FetchingPeerKey => "FetchingPeerKey",
            ExchangeState::Encrypting => "Encrypting",
            ExchangeState::Sending => "Sending",
            ExchangeState::AwaitingResponse => "AwaitingResponse",
            ExchangeState::Done(_) => "Done",
            ExchangeState::Failed(_) => "Failed",
        };
        f.write_str(name)
    }
}
