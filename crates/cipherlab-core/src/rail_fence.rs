//! Rail-fence (zigzag) transposition.
//!
//! Text is written along a zigzag path over `rows` rails, one character per
//! column, bouncing at the first and last rail. Reading the rails top to bottom
//! yields the cipher text. Decoding replays the same path to learn how many
//! characters each rail holds, slices the cipher text into rails, then walks the
//! path again pulling the next character from each visited rail.

use std::num::NonZeroUsize;

use crate::error::{CipherError, Result};
use crate::mode::TextCipher;

/// Number of zigzag rows. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RailKey(NonZeroUsize);

impl RailKey {
    /// Validates a row count.
    pub fn new(rows: usize) -> Result<Self> {
        NonZeroUsize::new(rows)
            .map(Self)
            .ok_or_else(|| CipherError::parameter("rail key must be at least 1"))
    }

    /// Parses a rail key from user input, rejecting non-integers and values below 1.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            CipherError::parameter(format!("rail key `{trimmed}` is not an integer"))
        })?;
        Self::try_from(value)
    }

    /// Row count.
    pub fn rows(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for RailKey {
    type Error = CipherError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 1 {
            return Err(CipherError::parameter(format!(
                "rail key must be at least 1, got {value}"
            )));
        }
        let rows = usize::try_from(value)
            .map_err(|_| CipherError::parameter(format!("rail key {value} is too large")))?;
        Self::new(rows)
    }
}

/// Row visited by each column of a `len`-column fence.
fn zigzag_path(len: usize, rows: usize) -> Vec<usize> {
    let mut path = Vec::with_capacity(len);
    if rows == 1 {
        path.resize(len, 0);
        return path;
    }

    let mut row = 0usize;
    let mut down = true;
    for _ in 0..len {
        path.push(row);
        if row == 0 {
            down = true;
        } else if row == rows - 1 {
            down = false;
        }
        if down {
            row += 1;
        } else {
            row -= 1;
        }
    }
    path
}

// Rails past the text length are never visited.
fn used_rails(len: usize, key: RailKey) -> usize {
    key.rows().min(len).max(1)
}

/// Encodes `text` over `key` rails.
pub fn encode(text: &str, key: RailKey) -> String {
    let len = text.chars().count();
    let path = zigzag_path(len, key.rows());

    let mut rails = vec![String::new(); used_rails(len, key)];
    for (ch, &row) in text.chars().zip(path.iter()) {
        rails[row].push(ch);
    }
    rails.concat()
}

/// Decodes `cipher` that was encoded over `key` rails.
pub fn decode(cipher: &str, key: RailKey) -> String {
    let chars: Vec<char> = cipher.chars().collect();
    let path = zigzag_path(chars.len(), key.rows());

    let mut counts = vec![0usize; used_rails(chars.len(), key)];
    for &row in &path {
        counts[row] += 1;
    }

    let mut cursors = Vec::with_capacity(counts.len());
    let mut start = 0;
    for count in counts {
        cursors.push(start);
        start += count;
    }

    path.iter()
        .map(|&row| {
            let ch = chars[cursors[row]];
            cursors[row] += 1;
            ch
        })
        .collect()
}

/// Rail-fence transform bound to a key.
#[derive(Clone, Copy, Debug)]
pub struct RailFence {
    key: RailKey,
}

impl RailFence {
    /// Creates a transform over `rows` rails.
    pub fn new(rows: usize) -> Result<Self> {
        Ok(Self::with_key(RailKey::new(rows)?))
    }

    /// Creates a transform from an already validated key.
    pub fn with_key(key: RailKey) -> Self {
        Self { key }
    }
}

impl TextCipher for RailFence {
    fn name(&self) -> &'static str {
        "rail-fence"
    }

    fn encode(&self, text: &str) -> Result<String> {
        Ok(encode(text, self.key))
    }

    fn decode(&self, text: &str) -> Result<String> {
        Ok(decode(text, self.key))
    }
}
