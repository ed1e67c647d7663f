//! Randomness sources for key generation and nonces.

use std::sync::{Mutex, PoisonError};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// A source of random bytes shared by concurrent callers.
///
/// Every seed and every box nonce is drawn from here. Implementations must
/// never repeat output across calls.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with fresh random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// The operating system CSPRNG. Use this outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// A reproducible stream seeded from a `u64`.
///
/// Two sources built from the same seed produce the same bytes, which makes
/// generated keys reproducible in tests. Not for production keys.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    /// Create a source from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(dest);
    }
}
