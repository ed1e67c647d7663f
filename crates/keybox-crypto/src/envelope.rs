//! Encrypted message envelopes.

use serde::{Deserialize, Serialize};

/// Size of a box nonce.
pub const NONCE_LEN: usize = 24;

/// Output of [`IdentityCrypto::encrypt`](crate::IdentityCrypto::encrypt).
///
/// `data` is base64 ciphertext (plaintext plus a 16-byte Poly1305 tag) and
/// `nonce` is base64 of the 24-byte nonce drawn for this message alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    data: String,
    nonce: String,
}

impl EncryptedEnvelope {
    /// Reassemble an envelope from its two text parts.
    #[must_use]
    pub fn new(data: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            nonce: nonce.into(),
        }
    }

    /// Base64 ciphertext.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Base64 nonce.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}
