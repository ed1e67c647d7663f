//! Shared fixtures for integration tests.

use keybox_crypto::{IdentityCrypto, SeededEntropy, SigningKeyPair};

/// Two identities that talk to each other through one crypto instance.
#[allow(dead_code)]
pub struct Conversation {
    /// The shared component.
    pub crypto: IdentityCrypto,
    /// The sending side.
    pub alice: SigningKeyPair,
    /// The receiving side.
    pub bob: SigningKeyPair,
}

#[allow(dead_code)]
impl Conversation {
    /// Fresh identities from OS entropy.
    pub fn new() -> Self {
        Self::with_crypto(IdentityCrypto::new())
    }

    /// Reproducible identities from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_crypto(
            IdentityCrypto::builder()
                .entropy(SeededEntropy::from_seed(seed))
                .build(),
        )
    }

    /// Identities generated by a caller-configured component.
    pub fn with_crypto(crypto: IdentityCrypto) -> Self {
        let alice = crypto.generate();
        let bob = crypto.generate();
        Self { crypto, alice, bob }
    }

    /// Alice seals `message` for Bob, Bob opens it.
    pub fn relay(&self, message: &str) -> String {
        let envelope = self
            .crypto
            .encrypt(message, self.bob.public_key(), self.alice.secret_key())
            .expect("encrypt");
        self.crypto
            .decrypt_envelope(&envelope, self.alice.public_key(), self.bob.secret_key())
            .expect("decrypt")
    }
}

/// Decode base64 test data.
#[allow(dead_code)]
pub fn b64(text: &str) -> Vec<u8> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(text)
        .expect("test data is base64")
}

/// Encode test data as base64.
#[allow(dead_code)]
pub fn to_b64(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
