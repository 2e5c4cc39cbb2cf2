//! The transmitted message bundle

use serde::{Deserialize, Serialize};

/// Bundle sent from client to server.
///
/// Fields are private so an envelope cannot change after it is built. Every
/// field defaults to an empty string when absent on the wire; the responder
/// treats empty and absent the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "encryptedMessage", default)]
    encrypted_message: String,
    #[serde(rename = "encryptedAESKey", default)]
    encrypted_aes_key: String,
    #[serde(default)]
    signature: String,
    #[serde(rename = "clientPublicKey", default)]
    client_public_key: String,
}

impl Envelope {
    pub fn new(
        encrypted_message: String,
        encrypted_aes_key: String,
        signature: String,
        client_public_key: String,
    ) -> Self {
        Self {
            encrypted_message,
            encrypted_aes_key,
            signature,
            client_public_key,
        }
    }

    /// `base64(iv) ":" base64(ciphertext)`
    pub fn encrypted_message(&self) -> &str {
        &self.encrypted_message
    }

    /// OAEP-wrapped symmetric key, base64
    pub fn encrypted_aes_key(&self) -> &str {
        &self.encrypted_aes_key
    }

    /// Signature over `encrypted_message`, base64
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Signer's SPKI PEM
    pub fn client_public_key(&self) -> &str {
        &self.client_public_key
    }

    /// Wire names of the fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("encryptedMessage", &self.encrypted_message),
            ("encryptedAESKey", &self.encrypted_aes_key),
            ("signature", &self.signature),
            ("clientPublicKey", &self.client_public_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
