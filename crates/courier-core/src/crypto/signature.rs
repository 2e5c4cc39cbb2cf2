//! SHA-256 signatures over transmitted bytes

use super::{parse_private_key, parse_public_key};
use crate::{CryptoError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;

pub struct SignatureEngine;

impl SignatureEngine {
    /// RSASSA-PKCS1-v1_5 signature over SHA-256(`data`), base64-encoded
    pub fn sign(data: &[u8], private_key: &str) -> Result<String> {
        let signing_key = SigningKey::<Sha256>::new(parse_private_key(private_key)?);
        let signature = signing_key
            .try_sign(data)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(STANDARD.encode(signature.to_bytes()))
    }

    /// Pure predicate: any malformed input is simply `false`.
    pub fn verify(data: &[u8], signature: &str, public_key: &str) -> bool {
        let Ok(public_key) = parse_public_key(public_key) else {
            return false;
        };
        let Ok(raw) = STANDARD.decode(signature) else {
            return false;
        };
        let Ok(signature) = Signature::try_from(raw.as_slice()) else {
            return false;
        };

        VerifyingKey::<Sha256>::new(public_key)
            .verify(data, &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CLIENT_KEYS, OTHER_KEYS};

    const DATA: &[u8] = b"q83vEjRWeJCrze8SNFZ4kA==:3q2+7w==";

    #[test]
    fn test_sign_verify() {
        let signature = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();
        assert!(SignatureEngine::verify(DATA, &signature, CLIENT_KEYS.public_key()));
        assert_eq!(STANDARD.decode(&signature).unwrap().len(), 256);
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let a = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();
        let b = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tampered_data_fails() {
        let signature = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();

        for byte in 0..DATA.len() {
            for bit in [0x01u8, 0x10, 0x80] {
                let mut tampered = DATA.to_vec();
                tampered[byte] ^= bit;
                assert!(!SignatureEngine::verify(
                    &tampered,
                    &signature,
                    CLIENT_KEYS.public_key()
                ));
            }
        }
    }

    #[test]
    fn test_wrong_public_key_fails() {
        let signature = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();
        assert!(!SignatureEngine::verify(DATA, &signature, OTHER_KEYS.public_key()));
    }

    #[test]
    fn test_malformed_inputs_are_false() {
        let signature = SignatureEngine::sign(DATA, CLIENT_KEYS.private_key()).unwrap();

        assert!(!SignatureEngine::verify(DATA, "", CLIENT_KEYS.public_key()));
        assert!(!SignatureEngine::verify(DATA, "%%%", CLIENT_KEYS.public_key()));
        assert!(!SignatureEngine::verify(
            DATA,
            &STANDARD.encode([1u8; 3]),
            CLIENT_KEYS.public_key()
        ));
        assert!(!SignatureEngine::verify(DATA, &signature, "garbage"));
    }

    #[test]
    fn test_sign_with_invalid_key() {
        assert!(matches!(
            SignatureEngine::sign(DATA, "garbage"),
            Err(CryptoError::InvalidKey(_))
        ));
    }
}
