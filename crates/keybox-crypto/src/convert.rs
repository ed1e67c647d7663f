//! Ed25519 → X25519 key conversion.
//!
//! A signing identity doubles as an encryption identity by mapping its keys
//! onto the birationally equivalent Montgomery curve:
//!
//! - public keys: decompress the Edwards point and take the Montgomery
//!   u-coordinate `(1 + y) / (1 - y)`;
//! - secret keys: hash the 32-byte seed with SHA-512 and clamp the low half,
//!   which is the same scalar Ed25519 itself signs with.
//!
//! Both transforms are pure and deterministic. The output matches
//! `ed2curve` byte for byte for every key this module accepts. The one
//! departure is that small-order public keys are refused here, where
//! `ed2curve` converts them.

use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::clamp_integer;
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// Size of an Ed25519 public key.
pub const SIGNING_PUBLIC_KEY_LEN: usize = 32;
/// Size of an Ed25519 seed.
pub const SEED_LEN: usize = 32;
/// Size of an Ed25519 secret key in `seed || public_key` form.
pub const SIGNING_SECRET_KEY_LEN: usize = 64;
/// Size of an X25519 key, public or secret.
pub const ENCRYPTION_KEY_LEN: usize = 32;

/// Which half of a key pair is being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    /// An Ed25519 public key.
    Public,
    /// An Ed25519 secret key (seed or `seed || public_key`).
    Secret,
}

/// Convert a signing key of the given role into its encryption counterpart.
///
/// This is the uncached transform; [`IdentityCrypto`](crate::IdentityCrypto)
/// memoizes it.
///
/// # Errors
///
/// - [`CryptoError::InvalidLength`] if `key` has the wrong size for `role`.
/// - [`CryptoError::InvalidKey`] if a public key is not a usable curve point.
pub fn convert_for_encryption(
    key: &[u8],
    role: KeyRole,
) -> CryptoResult<Zeroizing<[u8; ENCRYPTION_KEY_LEN]>> {
    match role {
        KeyRole::Public => {
            let public: &[u8; SIGNING_PUBLIC_KEY_LEN] =
                key.try_into().map_err(|_| CryptoError::InvalidLength {
                    field: "public key",
                    expected: SIGNING_PUBLIC_KEY_LEN,
                    actual: key.len(),
                })?;
            public_key_to_x25519(public).map(Zeroizing::new)
        },
        KeyRole::Secret => secret_key_to_x25519(key),
    }
}

/// Map an Ed25519 public key onto Curve25519.
///
/// Small-order points are rejected: they would make every Diffie-Hellman
/// output with them a fixed, publicly known value. `ed2curve` and TweetNaCl
/// convert such points anyway, so this is a deliberate break from them; for
/// every other point the result is the same bytes they produce.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKey`] if the bytes do not decompress to a
/// point or the point has small order.
pub fn public_key_to_x25519(
    public_key: &[u8; SIGNING_PUBLIC_KEY_LEN],
) -> CryptoResult<[u8; ENCRYPTION_KEY_LEN]> {
    let point = CompressedEdwardsY(*public_key)
        .decompress()
        .ok_or_else(|| CryptoError::InvalidKey("public key is not an Ed25519 point".into()))?;

    if point.is_small_order() {
        return Err(CryptoError::InvalidKey(
            "public key is a small-order point".into(),
        ));
    }

    Ok(point.to_montgomery().to_bytes())
}

/// Map an Ed25519 secret key onto a clamped X25519 scalar.
///
/// Accepts either the 64-byte `seed || public_key` form or a bare 32-byte
/// seed; only the seed participates.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidLength`] for any other size.
pub fn secret_key_to_x25519(secret_key: &[u8]) -> CryptoResult<Zeroizing<[u8; ENCRYPTION_KEY_LEN]>> {
    let seed = match secret_key.len() {
        SIGNING_SECRET_KEY_LEN | SEED_LEN => &secret_key[..SEED_LEN],
        actual => {
            return Err(CryptoError::InvalidLength {
                field: "secret key",
                expected: SIGNING_SECRET_KEY_LEN,
                actual,
            });
        },
    };

    let mut seed_bytes = Zeroizing::new([0u8; SEED_LEN]);
    seed_bytes.copy_from_slice(seed);

    let signing_key = SigningKey::from_bytes(&seed_bytes);
    let scalar = Zeroizing::new(signing_key.to_scalar_bytes());
    Ok(Zeroizing::new(clamp_integer(*scalar)))
}
