//! Keyed-hash commitment: HMAC-SHA3-256(key, value).

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::hex_serde;
use super::SecretKey;

type HmacSha3 = Hmac<Sha3_256>;

/// Errors from parsing or checking a revealed commitment
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Expected 32 bytes, found {found}")]
    Length { found: usize },
}

/// Commitment = HMAC-SHA3-256(key, decimal(value))
///
/// The value is authenticated as its decimal ASCII form so a user can
/// recompute the digest with any off-the-shelf HMAC tool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "hex_serde")] [u8; 32]);

impl Commitment {
    /// Create a commitment to `value` under `key`
    pub fn new(key: &SecretKey, value: u32) -> Self {
        let mac = Self::mac(key, value);
        Self(mac.finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase hex, the form shown to the user before they answer
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Verify that the given key and value produce this commitment
    pub fn verify(&self, key: &SecretKey, value: u32) -> bool {
        Self::mac(key, value).verify_slice(&self.0).is_ok()
    }

    fn mac(key: &SecretKey, value: u32) -> HmacSha3 {
        let mut mac =
            HmacSha3::new_from_slice(key.as_bytes()).expect("hmac accepts any key length");
        mac.update(value.to_string().as_bytes());
        mac
    }
}

impl FromStr for Commitment {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_serde::decode_32(s).map(Self)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SecretKey {
        SecretKey::from_bytes([byte; 32])
    }

    #[test]
    fn test_commitment_verification() {
        let commitment = Commitment::new(&key(1), 4);
        assert!(commitment.verify(&key(1), 4));
    }

    #[test]
    fn test_different_values_different_commitments() {
        assert_ne!(Commitment::new(&key(1), 0), Commitment::new(&key(1), 1));
    }

    #[test]
    fn test_different_keys_different_commitments() {
        assert_ne!(Commitment::new(&key(1), 3), Commitment::new(&key(2), 3));
    }

    #[test]
    fn test_wrong_value_fails_verification() {
        let commitment = Commitment::new(&key(7), 2);
        assert!(!commitment.verify(&key(7), 3));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let commitment = Commitment::new(&key(7), 2);
        assert!(!commitment.verify(&key(8), 2));
    }

    #[test]
    fn test_matches_plain_hmac_over_decimal_text() {
        let k = key(0x42);
        let mut mac = HmacSha3::new_from_slice(k.as_bytes()).unwrap();
        mac.update(b"15");
        let expected: [u8; 32] = mac.finalize().into_bytes().into();

        assert_eq!(Commitment::new(&k, 15).as_bytes(), &expected);
    }

    #[test]
    fn test_hex_parse_and_display() {
        let commitment = Commitment::new(&key(9), 5);
        let parsed: Commitment = commitment.to_string().parse().unwrap();
        assert_eq!(parsed, commitment);
        assert_eq!(commitment.to_hex().len(), 64);
    }
}
