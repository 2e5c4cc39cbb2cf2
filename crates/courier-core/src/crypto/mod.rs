//! Encryption module
//!
//! AES-256-CBC with PKCS#7 padding for message bodies, RSA-OAEP key wrapping,
//! and RSASSA-PKCS1-v1_5 over SHA-256 for signatures. Keys travel as PEM.

mod asymmetric;
mod key;
mod keygen;
mod signature;
mod symmetric;

pub use asymmetric::AsymmetricCipher;
pub use key::SymmetricKey;
pub use keygen::KeyPairGenerator;
pub use signature::SignatureEngine;
pub use symmetric::{EncryptedPayload, SymmetricCipher};

use crate::{CryptoError, Result};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// AES-256 key length in bytes
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes
pub const IV_LEN: usize = 16;

/// RSA modulus size for every generated key pair
pub const RSA_KEY_BITS: usize = 2048;

/// Parse an SPKI public key, falling back to a bare PKCS#1 `RSA PUBLIC KEY`.
pub(crate) fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| CryptoError::InvalidKey(format!("public key: {}", e)))
}

/// Parse a PKCS#8 private key, falling back to PKCS#1 `RSA PRIVATE KEY`.
pub(crate) fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| CryptoError::InvalidKey(format!("private key: {}", e)))
}
