//! Server-side envelope handling
//!
//! Stateless: every call receives the envelope and the server key pair
//! explicitly. Decryption runs before verification, so the candidate
//! plaintext sits in a zeroizing buffer and only leaves this module once the
//! signature checks out.

use crate::crypto::{AsymmetricCipher, SignatureEngine, SymmetricCipher};
use crate::{Envelope, KeyPair, ResponderError};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Unwrap, decrypt and verify one envelope.
pub fn handle(envelope: &Envelope, server_keys: &KeyPair) -> Result<String, ResponderError> {
    let missing = envelope.missing_fields();
    if !missing.is_empty() {
        warn!("Rejecting envelope, missing fields: {}", missing.join(", "));
        return Err(ResponderError::MissingField(missing));
    }

    let key = AsymmetricCipher::unwrap(envelope.encrypted_aes_key(), server_keys.private_key())
        .map_err(|e| {
            warn!("Key unwrap failed: {}", e);
            ResponderError::KeyUnwrap(e.to_string())
        })?;
    debug!("Unwrapped AES key, length: {}", key.as_bytes().len());

    let mut candidate = Zeroizing::new(
        SymmetricCipher::decrypt(envelope.encrypted_message(), &key).map_err(|e| {
            warn!("Message decryption failed: {}", e);
            ResponderError::Decryption(e.to_string())
        })?,
    );
    drop(key);
    debug!("Decrypted message, verifying signature");

    let verified = SignatureEngine::verify(
        envelope.encrypted_message().as_bytes(),
        envelope.signature(),
        envelope.client_public_key(),
    );
    if !verified {
        warn!("Signature verification failed, plaintext withheld");
        return Err(ResponderError::Signature);
    }

    info!("Envelope verified");
    Ok(std::mem::take(&mut *candidate))
}
