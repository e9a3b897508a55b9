//! Secret key for a single commitment round.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::hex_serde;
use super::VerifyError;

/// HMAC key for one commitment. Never reused across rounds.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(#[serde(with = "hex_serde")] [u8; 32]);

impl SecretKey {
    /// Length of the key in bytes
    pub const LEN: usize = 32;

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase hex, the form shown to the user on reveal
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for SecretKey {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_serde::decode_32(s).map(Self)
    }
}

// Only a prefix is printed so a stray debug log cannot leak a live key.
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}..)", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
