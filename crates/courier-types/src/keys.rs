//! Key pair types

use std::fmt;
use zeroize::Zeroize;

/// RSA key pair in PEM form.
///
/// The public half is an SPKI document, the private half a PKCS#8 document.
/// The private PEM is wiped from memory when the pair is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    public_key: String,
    private_key: String,
}

impl KeyPair {
    pub fn new(public_key: String, private_key: String) -> Self {
        Self {
            public_key,
            private_key,
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_private_key() {
        let pair = KeyPair::new("PUBLIC PEM".to_string(), "PRIVATE PEM".to_string());
        let printed = format!("{:?}", pair);

        assert!(printed.contains("PUBLIC PEM"));
        assert!(!printed.contains("PRIVATE PEM"));
        assert!(printed.contains("<redacted>"));
    }
}
