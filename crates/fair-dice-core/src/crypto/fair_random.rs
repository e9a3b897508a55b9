//! Single-use commit-reveal generator.
//!
//! Lifecycle: `commit` draws a secret value and key and publishes only the
//! [`Commitment`]; `reveal` consumes the generator and hands out the key and
//! value for verification. A revealed generator cannot be used again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Commitment, SecretKey};
use crate::entropy::Entropy;

/// A commitment was requested over an empty range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Cannot commit to a value in an empty range")]
pub struct RangeError;

/// Committed secret value in `[0, range)`, hidden behind its commitment
pub struct FairRandom {
    key: SecretKey,
    value: u32,
    range: u32,
    commitment: Commitment,
}

impl FairRandom {
    /// Draw a fresh key and a uniform value in `[0, range)` and commit to them
    pub fn commit<E: Entropy + ?Sized>(range: u32, entropy: &mut E) -> Result<Self, RangeError> {
        if range == 0 {
            return Err(RangeError);
        }
        let value = entropy.secret_value(range);
        debug_assert!(value < range, "entropy source returned out-of-range value");
        let key = entropy.secret_key();
        let commitment = Commitment::new(&key, value);

        Ok(Self {
            key,
            value,
            range,
            commitment,
        })
    }

    /// The published digest
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Size of the range the value was drawn from
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Open the commitment. Consumes the generator.
    pub fn reveal(self) -> Reveal {
        Reveal {
            key: self.key,
            value: self.value,
            range: self.range,
            commitment: self.commitment,
        }
    }
}

impl std::fmt::Debug for FairRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FairRandom")
            .field("range", &self.range)
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

/// An opened commitment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub key: SecretKey,
    pub value: u32,
    pub range: u32,
    pub commitment: Commitment,
}

impl Reveal {
    /// Recompute the HMAC and check it against the published commitment
    pub fn verify(&self) -> bool {
        self.value < self.range && self.commitment.verify(&self.key, self.value)
    }

    /// Combine the committed value with the counterparty's contribution.
    ///
    /// For a fixed committed value this is a bijection on `[0, range)`, so
    /// neither side alone decides the result.
    pub fn combine(&self, contribution: u32) -> u32 {
        ((u64::from(self.value) + u64::from(contribution)) % u64::from(self.range)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{RngEntropy, ScriptedEntropy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> RngEntropy<StdRng, StdRng> {
        RngEntropy::new(StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed + 1))
    }

    #[test]
    fn test_zero_range_rejected() {
        let mut entropy = seeded(1);
        assert_eq!(FairRandom::commit(0, &mut entropy).unwrap_err(), RangeError);
    }

    #[test]
    fn test_reveal_verifies_over_many_trials() {
        let mut entropy = seeded(42);
        for range in [1, 2, 6, 100] {
            for _ in 0..200 {
                let generator = FairRandom::commit(range, &mut entropy).unwrap();
                let published = *generator.commitment();
                let reveal = generator.reveal();

                assert!(reveal.value < range);
                assert_eq!(reveal.commitment, published);
                assert!(reveal.verify());
            }
        }
    }

    #[test]
    fn test_tampered_reveal_fails() {
        let mut entropy = ScriptedEntropy::new().with_values([3]);
        let mut reveal = FairRandom::commit(6, &mut entropy).unwrap().reveal();
        assert!(reveal.verify());

        reveal.value = 4;
        assert!(!reveal.verify());
    }

    #[test]
    fn test_out_of_range_reveal_fails() {
        let mut entropy = ScriptedEntropy::new().with_values([5]);
        let mut reveal = FairRandom::commit(6, &mut entropy).unwrap().reveal();
        reveal.range = 5;
        assert!(!reveal.verify());
    }

    #[test]
    fn test_fresh_key_per_round() {
        let mut entropy = seeded(7);
        let keys: HashSet<[u8; 32]> = (0..50)
            .map(|_| *FairRandom::commit(6, &mut entropy).unwrap().reveal().key.as_bytes())
            .collect();
        assert_eq!(keys.len(), 50);
    }

    #[test]
    fn test_combine_is_bijection() {
        for value in 0..6 {
            let mut entropy = ScriptedEntropy::new().with_values([value]);
            let reveal = FairRandom::commit(6, &mut entropy).unwrap().reveal();

            let results: HashSet<u32> = (0..6).map(|c| reveal.combine(c)).collect();
            assert_eq!(results, (0..6).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn test_combine_wraps() {
        let mut entropy = ScriptedEntropy::new().with_values([4]);
        let reveal = FairRandom::commit(6, &mut entropy).unwrap().reveal();
        assert_eq!(reveal.combine(1), 5);
        assert_eq!(reveal.combine(2), 0);
        assert_eq!(reveal.combine(5), 3);
    }

    #[test]
    fn test_debug_hides_value() {
        let mut entropy = ScriptedEntropy::new().with_values([1]);
        let generator = FairRandom::commit(2, &mut entropy).unwrap();
        let debug = format!("{:?}", generator);
        assert!(!debug.contains("value"));
        assert!(!debug.contains("key"));
    }

    #[test]
    fn test_reveal_json_uses_hex() {
        let mut entropy = ScriptedEntropy::new().with_values([2]);
        let reveal = FairRandom::commit(6, &mut entropy).unwrap().reveal();
        let json = serde_json::to_value(&reveal).unwrap();

        assert_eq!(json["value"], 2);
        assert_eq!(json["key"].as_str().unwrap(), reveal.key.to_hex());
        let back: Reveal = serde_json::from_value(json).unwrap();
        assert_eq!(back, reveal);
    }
}
