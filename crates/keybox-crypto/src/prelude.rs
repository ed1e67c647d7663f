//! Prelude module - commonly used types for convenient import.
//!
//! Use `use keybox_crypto::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use keybox_crypto::prelude::*;
//!
//! let crypto = IdentityCrypto::new();
//! let pair: SigningKeyPair = crypto.generate();
//!
//! let signature: DetachedSignature = crypto.sign("hello", pair.secret_key()).unwrap();
//! assert!(crypto.verify("hello", signature.as_str(), pair.public_key()).unwrap());
//! ```

// Errors
pub use crate::{CryptoError, CryptoResult, ErrorKind};

// Entry point
pub use crate::{IdentityCrypto, IdentityCryptoBuilder};

// Key material
pub use crate::{KeyRole, SigningKeyPair};

// Message types
pub use crate::{DetachedSignature, EncryptedEnvelope};

// Randomness
pub use crate::{EntropySource, OsEntropy, SeededEntropy};
