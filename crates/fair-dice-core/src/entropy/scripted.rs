//! Scripted entropy for deterministic sessions.

use super::Entropy;
use crate::crypto::SecretKey;
use std::collections::VecDeque;

/// Entropy that replays fixed values
///
/// Secret values and picks are consumed in order and reduced modulo the
/// requested range; an exhausted script yields 0. Keys are derived from a
/// round counter so every commitment still gets a distinct key.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    values: VecDeque<u32>,
    picks: VecDeque<usize>,
    keys_issued: u32,
}

impl ScriptedEntropy {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue committed values, one per commitment round
    pub fn with_values(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.values.extend(values);
        self
    }

    /// Queue positions for the computer's die picks
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of keys handed out so far
    pub fn keys_issued(&self) -> u32 {
        self.keys_issued
    }
}

impl Entropy for ScriptedEntropy {
    fn secret_value(&mut self, range: u32) -> u32 {
        self.values.pop_front().unwrap_or(0) % range
    }

    fn secret_key(&mut self) -> SecretKey {
        self.keys_issued += 1;
        let mut bytes = [0u8; SecretKey::LEN];
        bytes[..4].copy_from_slice(&self.keys_issued.to_be_bytes());
        bytes[4..].fill(0x5a);
        SecretKey::from_bytes(bytes)
    }

    fn pick(&mut self, count: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % count
    }
}
