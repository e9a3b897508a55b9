//! Randomness sources for the game.
//!
//! Commitments draw from a cryptographically strong source. The computer's
//! die pick has no adversarial exposure and draws from a general-purpose one.

mod scripted;

pub use scripted::ScriptedEntropy;

use crate::crypto::SecretKey;
use rand::rngs::{OsRng, ThreadRng};
use rand::{CryptoRng, Rng, RngCore};

/// Trait for the randomness the engine consumes
///
/// Implementations can be:
/// - RngEntropy for real play (OS randomness) or seeded trials
/// - ScriptedEntropy for deterministic sessions in tests
pub trait Entropy {
    /// Uniform value in `[0, range)`. Callers guarantee `range > 0`.
    fn secret_value(&mut self, range: u32) -> u32;

    /// Fresh commitment key
    fn secret_key(&mut self) -> SecretKey;

    /// Uniform position in `[0, count)` for the computer's die pick.
    /// Callers guarantee `count > 0`.
    fn pick(&mut self, count: usize) -> usize;
}

/// Entropy backed by two `rand` generators
pub struct RngEntropy<C, P> {
    secret: C,
    pick: P,
}

impl<C, P> RngEntropy<C, P>
where
    C: RngCore + CryptoRng,
    P: Rng,
{
    /// `secret` feeds commitments and keys, `pick` feeds the computer's die choice
    pub fn new(secret: C, pick: P) -> Self {
        Self { secret, pick }
    }
}

impl RngEntropy<OsRng, ThreadRng> {
    /// OS randomness for commitments, thread-local RNG for die picks
    pub fn system() -> Self {
        Self::new(OsRng, rand::thread_rng())
    }
}

impl<C, P> Entropy for RngEntropy<C, P>
where
    C: RngCore + CryptoRng,
    P: Rng,
{
    fn secret_value(&mut self, range: u32) -> u32 {
        self.secret.gen_range(0..range)
    }

    fn secret_key(&mut self) -> SecretKey {
        let mut bytes = [0u8; SecretKey::LEN];
        self.secret.fill_bytes(&mut bytes);
        SecretKey::from_bytes(bytes)
    }

    fn pick(&mut self, count: usize) -> usize {
        self.pick.gen_range(0..count)
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn secret_value(&mut self, range: u32) -> u32 {
        (**self).secret_value(range)
    }

    fn secret_key(&mut self) -> SecretKey {
        (**self).secret_key()
    }

    fn pick(&mut self, count: usize) -> usize {
        (**self).pick(count)
    }
}
