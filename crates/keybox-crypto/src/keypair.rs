//! Text-encoded Ed25519 signing identities.

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::convert::SIGNING_SECRET_KEY_LEN;
use crate::error::{CryptoError, CryptoResult};

/// A long-term Ed25519 identity in its text form.
///
/// `secret_key` is base64 of the 64-byte `seed || public_key` form and
/// `public_key` is base64 of the 32-byte verifying key. Both are produced by
/// [`IdentityCrypto::generate`](crate::IdentityCrypto::generate) or
/// [`IdentityCrypto::restore`](crate::IdentityCrypto::restore); the pair is
/// never mutated afterwards.
///
/// Deserializing runs the same checks as `restore`, plus a check that
/// `publicKey` is the public half of `secretKey`.
///
/// The secret text is zeroized on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase", try_from = "KeyPairText")]
pub struct SigningKeyPair {
    secret_key: String,
    #[zeroize(skip)]
    public_key: String,
}

/// Unchecked wire form of [`SigningKeyPair`].
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
struct KeyPairText {
    secret_key: String,
    #[zeroize(skip)]
    public_key: String,
}

impl TryFrom<KeyPairText> for SigningKeyPair {
    type Error = CryptoError;

    fn try_from(text: KeyPairText) -> CryptoResult<Self> {
        let pair = Self::from_secret_key(&text.secret_key)?;
        if pair.public_key != text.public_key {
            return Err(CryptoError::InvalidKey(
                "public key does not belong to secret key".into(),
            ));
        }
        Ok(pair)
    }
}

impl SigningKeyPair {
    /// Decode a 64-byte `seed || public_key` secret and check that the
    /// public half belongs to the seed.
    pub(crate) fn from_secret_key(secret_key: &str) -> CryptoResult<Self> {
        let bytes = codec::decode_array::<SIGNING_SECRET_KEY_LEN>("secret key", secret_key)?;
        let signing_key = SigningKey::from_keypair_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidKey(format!("inconsistent secret key: {e}")))?;
        Ok(Self::from_signing_key(&signing_key))
    }

    pub(crate) fn from_signing_key(signing_key: &SigningKey) -> Self {
        let keypair_bytes = zeroize::Zeroizing::new(signing_key.to_keypair_bytes());
        Self {
            secret_key: codec::encode(&*keypair_bytes),
            public_key: codec::encode(signing_key.verifying_key().as_bytes()),
        }
    }

    /// Base64 of the 64-byte secret key. Sensitive.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Base64 of the 32-byte public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Short, loggable identifier: hex of the first 8 public key bytes.
    #[must_use]
    pub fn key_id_hex(&self) -> String {
        codec::decode("public key", &self.public_key)
            .map(|bytes| codec::key_id_hex(&bytes))
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
