//! Cryptographic primitives for the fair dice protocol.
//!
//! This module provides:
//! - SecretKey, the per-round HMAC key
//! - Commitment, the published HMAC-SHA3-256 digest
//! - FairRandom and Reveal for the single-use commit-reveal lifecycle

mod commitment;
mod fair_random;
mod hex_serde;
mod key;

pub use commitment::{Commitment, VerifyError};
pub use fair_random::{FairRandom, RangeError, Reveal};
pub use key::SecretKey;
