//! Serde helpers encoding fixed-size byte arrays as hex strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
    hex::encode_upper(bytes).serialize(s)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
    let hex_str = String::deserialize(d)?;
    let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
    if bytes.len() != 32 {
        return Err(serde::de::Error::custom("expected 32 bytes"));
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Decode a 32-byte value from hex, accepting either case.
pub(crate) fn decode_32(hex_str: &str) -> Result<[u8; 32], super::VerifyError> {
    let bytes = hex::decode(hex_str.trim())?;
    let found = bytes.len();
    bytes
        .try_into()
        .map_err(|_| super::VerifyError::Length { found })
}
