//! RSA-OAEP key wrapping
//!
//! OAEP runs with SHA-1 for both the label hash and MGF1, matching the
//! defaults of the browser and Node clients this wire format came from.

use super::{parse_private_key, parse_public_key, SymmetricKey, SYMMETRIC_KEY_LEN};
use crate::{CryptoError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rsa::Oaep;
use sha1::Sha1;
use zeroize::Zeroizing;

pub struct AsymmetricCipher;

impl AsymmetricCipher {
    /// Wrap a symmetric key for the holder of `recipient_public_key` (SPKI PEM)
    pub fn wrap(key: &SymmetricKey, recipient_public_key: &str) -> Result<String> {
        Self::wrap_bytes(key.as_bytes(), recipient_public_key)
    }

    /// OAEP-encrypt arbitrary bytes. Input longer than the modulus allows is
    /// an error, never truncated.
    pub fn wrap_bytes(data: &[u8], recipient_public_key: &str) -> Result<String> {
        let public_key = parse_public_key(recipient_public_key)?;
        let wrapped = public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha1>(), data)
            .map_err(|e| CryptoError::Encryption(format!("OAEP wrap: {}", e)))?;
        Ok(STANDARD.encode(wrapped))
    }

    /// Recover a wrapped key with our own private key (PKCS#8 PEM).
    ///
    /// Everything that goes wrong here is a `KeyUnwrap` error, including a
    /// recovered value that is not exactly 32 bytes.
    pub fn unwrap(wrapped: &str, own_private_key: &str) -> Result<SymmetricKey> {
        let private_key = parse_private_key(own_private_key)
            .map_err(|e| CryptoError::KeyUnwrap(e.to_string()))?;
        let ciphertext = STANDARD
            .decode(wrapped)
            .map_err(|e| CryptoError::KeyUnwrap(format!("wrapped key is not valid base64: {}", e)))?;

        let recovered = Zeroizing::new(
            private_key
                .decrypt_blinded(&mut OsRng, Oaep::new::<Sha1>(), &ciphertext)
                .map_err(|e| CryptoError::KeyUnwrap(format!("OAEP unwrap: {}", e)))?,
        );

        if recovered.len() != SYMMETRIC_KEY_LEN {
            return Err(CryptoError::KeyUnwrap(format!(
                "recovered key is {} bytes, expected {}",
                recovered.len(),
                SYMMETRIC_KEY_LEN
            )));
        }
        SymmetricKey::from_slice(&recovered).map_err(|e| CryptoError::KeyUnwrap(e.to_string()))
    }
}
