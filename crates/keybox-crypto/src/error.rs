//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during identity and box operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input text could not be decoded (bad base64, bad UTF-8, oversized input).
    #[error("failed to decode {field}: {reason}")]
    Decode {
        /// Which input failed to decode.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Input decoded cleanly but has the wrong size.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which input had the wrong size.
        field: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Key bytes are not valid material for the required key family.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The box authentication tag did not verify.
    ///
    /// Wrong key, wrong nonce, tampering and truncation are deliberately
    /// indistinguishable.
    #[error("failed opening box")]
    Authentication,
}

/// Coarse classification of a [`CryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed text input or a length mismatch.
    Decode,
    /// Structurally invalid key material.
    InvalidKey,
    /// Box authentication failed.
    Authentication,
}

impl CryptoError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } | Self::InvalidLength { .. } => ErrorKind::Decode,
            Self::InvalidKey(_) => ErrorKind::InvalidKey,
            Self::Authentication => ErrorKind::Authentication,
        }
    }

    pub(crate) fn decode(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CryptoError::decode("nonce", "bad base64").kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            CryptoError::InvalidLength {
                field: "nonce",
                expected: 24,
                actual: 23,
            }
            .kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            CryptoError::InvalidKey("nope".into()).kind(),
            ErrorKind::InvalidKey
        );
        assert_eq!(CryptoError::Authentication.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn test_authentication_message() {
        assert_eq!(CryptoError::Authentication.to_string(), "failed opening box");
    }
}
