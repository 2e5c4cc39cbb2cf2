//! RSA key pair generation

use super::RSA_KEY_BITS;
use crate::{CryptoError, KeyPair, Result};
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

pub struct KeyPairGenerator;

impl KeyPairGenerator {
    /// Generate an independent 2048-bit pair, exponent 65537.
    ///
    /// Public half is SPKI PEM, private half PKCS#8 PEM. This is CPU-bound;
    /// async callers should run it on a blocking thread.
    pub fn generate() -> Result<KeyPair> {
        let private_key = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(format!("PKCS#8 encoding: {}", e)))?;
        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(format!("SPKI encoding: {}", e)))?;

        debug!("Generated {}-bit RSA key pair", RSA_KEY_BITS);
        Ok(KeyPair::new(public_pem, private_pem.to_string()))
    }
}
