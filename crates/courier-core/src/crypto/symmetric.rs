//! AES-256-CBC message encryption

use super::{SymmetricKey, IV_LEN};
use crate::{CryptoError, Result};
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Separator between the IV and ciphertext halves of the wire form
const DELIMITER: char = ':';

/// IV plus CBC ciphertext.
///
/// Wire form is `base64(iv) ":" base64(ciphertext)` with the standard padded
/// alphabet; `Display` and `FromStr` convert between the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Parse the wire form, splitting at the first `:`.
    pub fn parse(wire: &str) -> Result<Self> {
        let (iv_b64, ciphertext_b64) = wire.split_once(DELIMITER).ok_or_else(|| {
            CryptoError::Decryption("payload has no ':' delimiter".to_string())
        })?;

        let iv_bytes = STANDARD
            .decode(iv_b64)
            .map_err(|e| CryptoError::Decryption(format!("iv is not valid base64: {}", e)))?;
        let iv: [u8; IV_LEN] = iv_bytes.as_slice().try_into().map_err(|_| {
            CryptoError::Decryption(format!(
                "iv must be {} bytes, got {}",
                IV_LEN,
                iv_bytes.len()
            ))
        })?;

        let ciphertext = STANDARD.decode(ciphertext_b64).map_err(|e| {
            CryptoError::Decryption(format!("ciphertext is not valid base64: {}", e))
        })?;

        Ok(Self { iv, ciphertext })
    }
}

impl fmt::Display for EncryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            STANDARD.encode(self.iv),
            DELIMITER,
            STANDARD.encode(&self.ciphertext)
        )
    }
}

impl FromStr for EncryptedPayload {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

pub struct SymmetricCipher;

impl SymmetricCipher {
    /// Encrypt under a freshly sampled IV. There is no way to supply an IV.
    pub fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<EncryptedPayload> {
        let mut iv = [0u8; IV_LEN];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| CryptoError::Encryption(format!("entropy source: {}", e)))?;

        let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(EncryptedPayload { iv, ciphertext })
    }

    /// Decrypt a wire-form payload back to UTF-8 text
    pub fn decrypt(payload: &str, key: &SymmetricKey) -> Result<String> {
        Self::decrypt_payload(&EncryptedPayload::parse(payload)?, key)
    }

    pub fn decrypt_payload(payload: &EncryptedPayload, key: &SymmetricKey) -> Result<String> {
        let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &payload.iv)
            .map_err(|e| CryptoError::Decryption(e.to_string()))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&payload.ciphertext)
            .map_err(|_| CryptoError::Decryption("invalid padding".to_string()))?;

        String::from_utf8(plaintext).map_err(|e| {
            e.into_bytes().zeroize();
            CryptoError::Decryption("plaintext is not valid UTF-8".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SymmetricKey {
        SymmetricKey::from_slice(&[byte; 32]).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let key = SymmetricKey::generate().unwrap();
        for message in [
            "",
            "Hello, world!",
            "exactly sixteen!",
            "Привет, мир! こんにちは 🌍",
            &"long message ".repeat(200),
        ] {
            let payload = SymmetricCipher::encrypt(message, &key).unwrap();
            let decrypted = SymmetricCipher::decrypt(&payload.to_string(), &key).unwrap();
            assert_eq!(decrypted, message);
        }
    }

    #[test]
    fn test_wire_form() {
        let payload = SymmetricCipher::encrypt("Hello, world!", &key(1)).unwrap();
        let wire = payload.to_string();
        let (iv_b64, ct_b64) = wire.split_once(':').unwrap();

        assert_eq!(STANDARD.decode(iv_b64).unwrap().len(), IV_LEN);
        // 13 bytes of text pad to a single block
        assert_eq!(STANDARD.decode(ct_b64).unwrap().len(), 16);
        assert_eq!(wire.parse::<EncryptedPayload>().unwrap(), payload);
    }

    #[test]
    fn test_full_block_gets_extra_padding_block() {
        let payload = SymmetricCipher::encrypt("exactly sixteen!", &key(1)).unwrap();
        assert_eq!(payload.ciphertext().len(), 32);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = key(9);
        let first = SymmetricCipher::encrypt("same text", &key).unwrap();
        let second = SymmetricCipher::encrypt("same text", &key).unwrap();

        assert_ne!(first.iv(), second.iv());
        assert_ne!(first.ciphertext(), second.ciphertext());
    }

    #[test]
    fn test_wrong_key() {
        let payload = SymmetricCipher::encrypt("Hello, world!", &key(1))
            .unwrap()
            .to_string();

        match SymmetricCipher::decrypt(&payload, &key(2)) {
            Err(e) => assert!(matches!(e, CryptoError::Decryption(_))),
            Ok(text) => assert_ne!(text, "Hello, world!"),
        }
    }

    #[test]
    fn test_missing_delimiter() {
        let err = SymmetricCipher::decrypt("AAAAAAAAAAAAAAAAAAAAAA==", &key(1)).unwrap_err();
        assert!(matches!(err, CryptoError::Decryption(_)));
    }

    #[test]
    fn test_short_iv_rejected() {
        let wire = format!("{}:{}", STANDARD.encode([0u8; 8]), STANDARD.encode([0u8; 16]));
        let err = SymmetricCipher::decrypt(&wire, &key(1)).unwrap_err();
        assert!(err.to_string().contains("iv must be 16 bytes"));
    }

    #[test]
    fn test_url_safe_alphabet_rejected() {
        let wire = format!("{}:{}", "-_-_-_-_-_-_-_-_-_-_-w==", STANDARD.encode([0u8; 16]));
        assert!(SymmetricCipher::decrypt(&wire, &key(1)).is_err());
    }

    #[test]
    fn test_truncated_ciphertext_rejected() {
        let payload = SymmetricCipher::encrypt("Hello, world!", &key(1)).unwrap();
        let wire = format!(
            "{}:{}",
            STANDARD.encode(payload.iv()),
            STANDARD.encode(&payload.ciphertext()[..10])
        );
        assert!(matches!(
            SymmetricCipher::decrypt(&wire, &key(1)),
            Err(CryptoError::Decryption(_))
        ));
    }

    #[test]
    fn test_splits_at_first_colon_only() {
        let payload = SymmetricCipher::encrypt("a:b:c", &key(3)).unwrap();
        let wire = format!("{}:extra", payload);
        // The trailing ":extra" lands in the ciphertext half and breaks base64.
        assert!(SymmetricCipher::decrypt(&wire, &key(3)).is_err());
        assert_eq!(
            SymmetricCipher::decrypt(&payload.to_string(), &key(3)).unwrap(),
            "a:b:c"
        );
    }
}
