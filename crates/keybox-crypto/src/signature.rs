//! Detached Ed25519 signatures in text form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec;

/// Size of an Ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Base64 of a 64-byte Ed25519 signature, kept apart from the signed data.
///
/// Binds exactly the bytes that were signed and the secret key that signed
/// them. Verification needs the original data and the signer's public key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetachedSignature(String);

impl DetachedSignature {
    /// Wrap signature text received from elsewhere.
    ///
    /// The text is not checked here; [`IdentityCrypto::verify`](crate::IdentityCrypto::verify)
    /// decodes and length-checks it.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub(crate) fn from_bytes(bytes: &[u8; SIGNATURE_LEN]) -> Self {
        Self(codec::encode(bytes))
    }

    /// The base64 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the base64 text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for DetachedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..16).unwrap_or(&self.0);
        write!(f, "DetachedSignature({prefix}...)")
    }
}

impl fmt::Display for DetachedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DetachedSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DetachedSignature> for String {
    fn from(sig: DetachedSignature) -> Self {
        sig.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip() {
        let sig = DetachedSignature::from_bytes(&[5u8; SIGNATURE_LEN]);
        assert_eq!(DetachedSignature::new(sig.as_str()), sig);
        assert_eq!(sig.to_string(), sig.as_str());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let sig = DetachedSignature::new("abc=");
        assert_eq!(serde_json::to_string(&sig).unwrap(), "\"abc=\"");
    }

    #[test]
    fn test_debug_truncates() {
        let sig = DetachedSignature::from_bytes(&[0u8; SIGNATURE_LEN]);
        let debug = format!("{sig:?}");
        assert!(debug.starts_with("DetachedSignature(AAAAAAAAAAAAAAAA"));
        assert!(debug.len() < sig.as_str().len());
    }
}
