//! The identity component: key pairs, boxes and detached signatures.
//!
//! Every operation takes text in and gives text out. Binary values cross the
//! boundary as standard base64, messages as UTF-8. Keys used for encryption
//! are the caller's signing keys converted onto Curve25519 (see
//! [`convert`](crate::convert)); signing always uses the original Ed25519 key.

use std::sync::Arc;

use crypto_box::aead::{Aead, Nonce};
use crypto_box::{PublicKey as BoxPublicKey, SalsaBox, SecretKey as BoxSecretKey};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cache::{CacheStats, ConversionCache};
use crate::codec;
use crate::convert::{
    self, ENCRYPTION_KEY_LEN, KeyRole, SEED_LEN, SIGNING_PUBLIC_KEY_LEN, SIGNING_SECRET_KEY_LEN,
};
use crate::entropy::{EntropySource, OsEntropy};
use crate::envelope::{EncryptedEnvelope, NONCE_LEN};
use crate::error::{CryptoError, CryptoResult};
use crate::keypair::SigningKeyPair;
use crate::signature::{DetachedSignature, SIGNATURE_LEN};

/// Signing identities, authenticated encryption between identities, and
/// detached signatures.
///
/// Owns its conversion cache and its entropy source; nothing is global.
/// All methods take `&self`, so one instance can be shared across threads
/// behind an `Arc`.
///
/// # Example
///
/// ```
/// use keybox_crypto::IdentityCrypto;
///
/// let crypto = IdentityCrypto::new();
/// let alice = crypto.generate();
/// let bob = crypto.generate();
///
/// let envelope = crypto
///     .encrypt("hello", bob.public_key(), alice.secret_key())
///     .unwrap();
/// let plaintext = crypto
///     .decrypt(envelope.data(), envelope.nonce(), alice.public_key(), bob.secret_key())
///     .unwrap();
/// assert_eq!(plaintext, "hello");
/// ```
pub struct IdentityCrypto {
    cache: ConversionCache,
    entropy: Arc<dyn EntropySource>,
}

impl IdentityCrypto {
    /// OS entropy and a cache of [`ConversionCache::DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring an instance.
    #[must_use]
    pub fn builder() -> IdentityCryptoBuilder {
        IdentityCryptoBuilder::default()
    }

    /// Generate a fresh signing identity.
    #[must_use]
    pub fn generate(&self) -> SigningKeyPair {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        self.entropy.fill_bytes(&mut *seed);

        let signing_key = SigningKey::from_bytes(&seed);
        let pair = SigningKeyPair::from_signing_key(&signing_key);
        debug!(key_id = %pair.key_id_hex(), "generated signing key pair");
        pair
    }

    /// Rebuild a signing identity from its 64-byte secret key.
    ///
    /// `restore(pair.secret_key())` reproduces `pair` exactly.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Decode`] / [`CryptoError::InvalidLength`] if the text
    ///   is not base64 of 64 bytes.
    /// - [`CryptoError::InvalidKey`] if the trailing public half does not
    ///   belong to the leading seed.
    pub fn restore(&self, secret_key: &str) -> CryptoResult<SigningKeyPair> {
        let pair = SigningKeyPair::from_secret_key(secret_key)?;
        debug!(key_id = %pair.key_id_hex(), "restored signing key pair");
        Ok(pair)
    }

    /// Convert a signing key to its encryption counterpart, memoized.
    ///
    /// `key` is the raw Ed25519 public key (32 bytes) or secret key
    /// (64 bytes, or a 32-byte seed) according to `role`.
    ///
    /// # Errors
    ///
    /// See [`convert::convert_for_encryption`].
    pub fn convert_for_encryption(
        &self,
        key: &[u8],
        role: KeyRole,
    ) -> CryptoResult<Zeroizing<[u8; ENCRYPTION_KEY_LEN]>> {
        self.cache
            .get_or_convert(role, key, || convert::convert_for_encryption(key, role))
    }

    /// Encrypt `plaintext` from the holder of `my_secret_key` to the holder
    /// of `their_public_key`.
    ///
    /// A new random nonce is drawn on every call.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Decode`] / [`CryptoError::InvalidLength`] for
    ///   malformed key text.
    /// - [`CryptoError::InvalidKey`] if `their_public_key` cannot be
    ///   converted.
    pub fn encrypt(
        &self,
        plaintext: &str,
        their_public_key: &str,
        my_secret_key: &str,
    ) -> CryptoResult<EncryptedEnvelope> {
        let salsa_box = self.shared_box(their_public_key, my_secret_key)?;

        let mut nonce = [0u8; NONCE_LEN];
        self.entropy.fill_bytes(&mut nonce);

        let ciphertext = salsa_box
            .encrypt(Nonce::<SalsaBox>::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CryptoError::decode("plaintext", "message too long to seal"))?;

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sealed box"
        );

        Ok(EncryptedEnvelope::new(
            codec::encode(&ciphertext),
            codec::encode(&nonce),
        ))
    }

    /// Open a box sealed by the holder of `their_public_key` for the holder
    /// of `my_secret_key`.
    ///
    /// Either returns fully authenticated plaintext or fails; never partial
    /// output. Decryption has no side effects, so repeating it gives the same
    /// answer.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Decode`] / [`CryptoError::InvalidLength`] for
    ///   malformed input text, a nonce that is not 24 bytes, or plaintext
    ///   that is not UTF-8.
    /// - [`CryptoError::InvalidKey`] if `their_public_key` cannot be
    ///   converted.
    /// - [`CryptoError::Authentication`] for any tag failure.
    pub fn decrypt(
        &self,
        data: &str,
        nonce: &str,
        their_public_key: &str,
        my_secret_key: &str,
    ) -> CryptoResult<String> {
        let ciphertext = codec::decode("ciphertext", data)?;
        let nonce = codec::decode_array::<NONCE_LEN>("nonce", nonce)?;
        let salsa_box = self.shared_box(their_public_key, my_secret_key)?;

        let plaintext = salsa_box
            .decrypt(Nonce::<SalsaBox>::from_slice(&*nonce), ciphertext.as_slice())
            .map_err(|_| {
                debug!(ciphertext_len = ciphertext.len(), "box authentication failed");
                CryptoError::Authentication
            })?;

        codec::utf8("plaintext", plaintext)
    }

    /// [`decrypt`](Self::decrypt) taking the envelope as produced by
    /// [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Same as [`decrypt`](Self::decrypt).
    pub fn decrypt_envelope(
        &self,
        envelope: &EncryptedEnvelope,
        their_public_key: &str,
        my_secret_key: &str,
    ) -> CryptoResult<String> {
        self.decrypt(
            envelope.data(),
            envelope.nonce(),
            their_public_key,
            my_secret_key,
        )
    }

    /// Produce a detached signature over the UTF-8 bytes of `data`.
    ///
    /// Ed25519 signing is deterministic: the same data and key always give
    /// the same signature.
    ///
    /// Only the leading 32-byte seed of `my_secret_key` is used. The public
    /// half is not checked against it; the signature is always made with the
    /// seed's own key and verifies under the seed's public key. Use
    /// [`restore`](Self::restore) to reject a key whose halves disagree.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Decode`] / [`CryptoError::InvalidLength`] if the secret
    /// key text is not base64 of 64 bytes.
    #[allow(clippy::unused_self)]
    pub fn sign(&self, data: &str, my_secret_key: &str) -> CryptoResult<DetachedSignature> {
        let secret = codec::decode_array::<SIGNING_SECRET_KEY_LEN>("secret key", my_secret_key)?;
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        seed.copy_from_slice(&secret[..SEED_LEN]);

        let signature = SigningKey::from_bytes(&seed).sign(data.as_bytes());
        Ok(DetachedSignature::from_bytes(&signature.to_bytes()))
    }

    /// Check a detached signature over the UTF-8 bytes of `data`.
    ///
    /// A mismatch is `Ok(false)`, as is a public key that is not a valid
    /// curve point.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Decode`] / [`CryptoError::InvalidLength`] if the
    /// signature is not base64 of 64 bytes or the public key is not base64
    /// of 32 bytes.
    #[allow(clippy::unused_self)]
    pub fn verify(&self, data: &str, signature: &str, their_public_key: &str) -> CryptoResult<bool> {
        let signature = codec::decode_array::<SIGNATURE_LEN>("signature", signature)?;
        let public = codec::decode_array::<SIGNING_PUBLIC_KEY_LEN>("public key", their_public_key)?;

        let Ok(verifying_key) = VerifyingKey::from_bytes(&public) else {
            debug!(key_id = %codec::key_id_hex(&*public), "public key is not a curve point");
            return Ok(false);
        };

        let verified = verifying_key
            .verify(data.as_bytes(), &Signature::from_bytes(&signature))
            .is_ok();
        debug!(key_id = %codec::key_id_hex(&*public), verified, "checked signature");
        Ok(verified)
    }

    /// Counters of the conversion cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The conversion cache owned by this instance, for inspection.
    #[must_use]
    pub fn cache(&self) -> &ConversionCache {
        &self.cache
    }

    fn shared_box(&self, their_public_key: &str, my_secret_key: &str) -> CryptoResult<SalsaBox> {
        let their_public =
            codec::decode_array::<SIGNING_PUBLIC_KEY_LEN>("public key", their_public_key)?;
        let my_secret = codec::decode_array::<SIGNING_SECRET_KEY_LEN>("secret key", my_secret_key)?;

        let their_x25519 = self.convert_for_encryption(&*their_public, KeyRole::Public)?;
        let my_x25519 = self.convert_for_encryption(&*my_secret, KeyRole::Secret)?;

        Ok(SalsaBox::new(
            &BoxPublicKey::from(*their_x25519),
            &BoxSecretKey::from(*my_x25519),
        ))
    }
}

impl Default for IdentityCrypto {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdentityCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCrypto")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Builder for [`IdentityCrypto`].
pub struct IdentityCryptoBuilder {
    cache_capacity: usize,
    entropy: Arc<dyn EntropySource>,
}

impl Default for IdentityCryptoBuilder {
    fn default() -> Self {
        Self {
            cache_capacity: ConversionCache::DEFAULT_CAPACITY,
            entropy: Arc::new(OsEntropy),
        }
    }
}

impl IdentityCryptoBuilder {
    /// Bound the conversion cache to `capacity` entries (0 disables it).
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Draw seeds and nonces from `source` instead of the OS.
    #[must_use]
    pub fn entropy(mut self, source: impl EntropySource + 'static) -> Self {
        self.entropy = Arc::new(source);
        self
    }

    /// Share an entropy source with other components.
    #[must_use]
    pub fn shared_entropy(mut self, source: Arc<dyn EntropySource>) -> Self {
        self.entropy = source;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> IdentityCrypto {
        IdentityCrypto {
            cache: ConversionCache::new(self.cache_capacity),
            entropy: self.entropy,
        }
    }
}
