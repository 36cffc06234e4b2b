//! Key types for AES-128 and AES-256.

use crate::block::Block;

/// Largest round count supported (AES-256).
pub(crate) const MAX_ROUNDS: usize = 14;

/// AES cipher key of one of the supported sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AesKey {
    /// 128-bit key, 10 rounds.
    Aes128([u8; 16]),
    /// 256-bit key, 14 rounds.
    Aes256([u8; 32]),
}

impl AesKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AesKey::Aes128(bytes) => bytes,
            AesKey::Aes256(bytes) => bytes,
        }
    }

    /// Number of cipher rounds `Nr` for this key size.
    pub fn rounds(&self) -> usize {
        match self {
            AesKey::Aes128(_) => 10,
            AesKey::Aes256(_) => MAX_ROUNDS,
        }
    }
}

impl From<[u8; 16]> for AesKey {
    fn from(value: [u8; 16]) -> Self {
        AesKey::Aes128(value)
    }
}

impl From<[u8; 32]> for AesKey {
    fn from(value: [u8; 32]) -> Self {
        AesKey::Aes256(value)
    }
}

/// Expanded round keys; only the first `rounds + 1` entries are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    pub(crate) keys: [Block; MAX_ROUNDS + 1],
    pub(crate) rounds: usize,
}

impl RoundKeys {
    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        debug_assert!(round <= self.rounds);
        &self.keys[round]
    }

    /// Number of cipher rounds these keys were expanded for.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
