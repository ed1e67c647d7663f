//! Keybox Crypto - signing identities that double as encryption identities.
//!
//! This crate provides:
//! - Ed25519 key pairs in base64 text form, generated or restored
//! - Ed25519 → X25519 key conversion with a bounded, thread-safe cache
//! - `XSalsa20-Poly1305` authenticated boxes between two identities
//! - Detached Ed25519 signatures
//!
//! Everything crosses the API as text: binary values as standard base64,
//! messages as UTF-8.
//!
//! # Example
//!
//! ```
//! use keybox_crypto::IdentityCrypto;
//!
//! let crypto = IdentityCrypto::new();
//! let alice = crypto.generate();
//! let bob = crypto.generate();
//!
//! // Alice seals a message for Bob.
//! let envelope = crypto
//!     .encrypt("hello", bob.public_key(), alice.secret_key())
//!     .unwrap();
//!
//! // Bob opens it with Alice's public key.
//! let message = crypto
//!     .decrypt_envelope(&envelope, alice.public_key(), bob.secret_key())
//!     .unwrap();
//! assert_eq!(message, "hello");
//!
//! // Alice signs; anyone holding her public key can check.
//! let signature = crypto.sign("hello", alice.secret_key()).unwrap();
//! assert!(crypto.verify("hello", signature.as_str(), alice.public_key()).unwrap());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod codec;
pub mod convert;
pub mod prelude;

mod cache;
mod entropy;
mod envelope;
mod error;
mod identity;
mod keypair;
mod signature;

pub use cache::{CacheStats, ConversionCache};
pub use convert::KeyRole;
pub use entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use envelope::{EncryptedEnvelope, NONCE_LEN};
pub use error::{CryptoError, CryptoResult, ErrorKind};
pub use identity::{IdentityCrypto, IdentityCryptoBuilder};
pub use keypair::SigningKeyPair;
pub use signature::{DetachedSignature, SIGNATURE_LEN};
