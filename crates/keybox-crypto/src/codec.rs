//! Text boundary: base64 for binary values, UTF-8 for messages.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// Encode bytes as standard, padded base64.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 of any length.
///
/// The buffer is zeroized on drop since callers routinely decode secrets.
///
/// # Errors
///
/// Returns [`CryptoError::Decode`] if `text` is not valid base64.
pub fn decode(field: &'static str, text: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    STANDARD
        .decode(text)
        .map(Zeroizing::new)
        .map_err(|e| CryptoError::decode(field, e.to_string()))
}

/// Decode standard base64 that must be exactly `N` bytes long.
///
/// # Errors
///
/// Returns [`CryptoError::Decode`] for invalid base64 and
/// [`CryptoError::InvalidLength`] when the decoded size is not `N`.
pub fn decode_array<const N: usize>(
    field: &'static str,
    text: &str,
) -> CryptoResult<Zeroizing<[u8; N]>> {
    let bytes = decode(field, text)?;
    let mut out = Zeroizing::new([0u8; N]);
    if bytes.len() != N {
        return Err(CryptoError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        });
    }
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Interpret decrypted bytes as UTF-8 text.
///
/// # Errors
///
/// Returns [`CryptoError::Decode`] if the bytes are not valid UTF-8.
pub fn utf8(field: &'static str, bytes: Vec<u8>) -> CryptoResult<String> {
    String::from_utf8(bytes).map_err(|e| CryptoError::decode(field, e.utf8_error().to_string()))
}

/// Short identifier for a public key: hex of its first 8 bytes.
///
/// Safe to log; never call this on secret material.
#[must_use]
pub fn key_id_hex(public_key: &[u8]) -> String {
    hex::encode(public_key.get(..8).unwrap_or(public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array_exact() {
        let text = encode(&[9u8; 24]);
        let bytes = decode_array::<24>("nonce", &text).unwrap();
        assert_eq!(*bytes, [9u8; 24]);
    }

    #[test]
    fn test_decode_array_wrong_length() {
        let text = encode(&[9u8; 23]);
        let err = decode_array::<24>("nonce", &text).unwrap_err();
        assert_eq!(
            err,
            CryptoError::InvalidLength {
                field: "nonce",
                expected: 24,
                actual: 23,
            }
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("ciphertext", "not base64!!").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::Decode {
                field: "ciphertext",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_requires_padding() {
        // "AA" without padding is one byte in unpadded base64; the standard
        // engine insists on the canonical padded form.
        assert!(decode("data", "AA").is_err());
        assert_eq!(*decode("data", "AA==").unwrap(), vec![0u8]);
    }

    #[test]
    fn test_utf8() {
        assert_eq!(utf8("plaintext", b"hello".to_vec()).unwrap(), "hello");
        assert!(utf8("plaintext", vec![0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_key_id_hex() {
        let id = key_id_hex(&[0xab; 32]);
        assert_eq!(id, "abababababababab");
        assert_eq!(key_id_hex(&[1, 2]), "0102");
    }
}
