//! Vigenère polyalphabetic substitution over the ASCII alphabet.
//!
//! Only ASCII letters are shifted and only they advance the key cursor; every
//! other character, including non-ASCII letters, is copied through unchanged.

use crate::error::{CipherError, Result};
use crate::mode::TextCipher;

const ALPHABET: u8 = 26;

/// Output casing for shifted letters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Every shifted letter is emitted upper-case.
    #[default]
    Upper,
    /// Shifted letters keep the case of the input letter.
    Preserve,
}

/// Vigenère transform bound to a validated key.
#[derive(Clone, Debug)]
pub struct Vigenere {
    shifts: Vec<u8>,
    case: CasePolicy,
}

impl Vigenere {
    /// Builds a transform from an alphabetic key with upper-case output.
    pub fn new(key: &str) -> Result<Self> {
        Self::with_case(key, CasePolicy::default())
    }

    /// Builds a transform with an explicit case policy.
    pub fn with_case(key: &str, case: CasePolicy) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherError::parameter("Vigenère key must not be empty"));
        }
        let shifts = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphabetic() {
                    Ok((ch.to_ascii_uppercase() as u8 - b'A') % ALPHABET)
                } else {
                    Err(CipherError::parameter(format!(
                        "Vigenère key may only contain letters A-Z, found {ch:?}"
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { shifts, case })
    }

    fn transform(&self, text: &str, forward: bool) -> String {
        let mut cursor = 0usize;
        text.chars()
            .map(|ch| {
                if !ch.is_ascii_alphabetic() {
                    return ch;
                }
                let shift = self.shifts[cursor % self.shifts.len()];
                cursor += 1;

                let offset = ch.to_ascii_uppercase() as u8 - b'A';
                let shifted = if forward {
                    (offset + shift) % ALPHABET
                } else {
                    (offset + ALPHABET - shift) % ALPHABET
                };
                let base = match self.case {
                    CasePolicy::Preserve if ch.is_ascii_lowercase() => b'a',
                    _ => b'A',
                };
                char::from(base + shifted)
            })
            .collect()
    }
}

impl TextCipher for Vigenere {
    fn name(&self) -> &'static str {
        "vigenere"
    }

    fn encode(&self, text: &str) -> Result<String> {
        Ok(self.transform(text, true))
    }

    fn decode(&self, text: &str) -> Result<String> {
        Ok(self.transform(text, false))
    }
}

/// Encodes `text` with `key`, upper-casing the output.
pub fn encode(text: &str, key: &str) -> Result<String> {
    Vigenere::new(key)?.encode(text)
}

/// Decodes `cipher` with `key`, upper-casing the output.
pub fn decode(cipher: &str, key: &str) -> Result<String> {
    Vigenere::new(key)?.decode(cipher)
}
