//! Text form of toy-RSA cipher values: `[12, 345, 6]`.
//!
//! Grammar, whitespace allowed around every token:
//!
//! ```text
//! list  := '[' items? ']' | items
//! items := uint (',' uint)*
//! uint  := [0-9]+
//! ```

use num_bigint::BigUint;

use crate::error::{CipherError, Result};

/// Parses a comma separated, optionally bracketed list of unsigned integers.
pub fn parse_cipher_list(input: &str) -> Result<Vec<BigUint>> {
    let trimmed = input.trim();
    let body = if let Some(rest) = trimmed.strip_prefix('[') {
        let inner = rest
            .strip_suffix(']')
            .ok_or_else(|| CipherError::encoding("missing closing `]`"))?;
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }
        inner
    } else if trimmed.ends_with(']') {
        return Err(CipherError::encoding("missing opening `[`"));
    } else if trimmed.is_empty() {
        return Err(CipherError::encoding("cipher list is empty"));
    } else {
        trimmed
    };

    body.split(',')
        .enumerate()
        .map(|(position, raw)| {
            let token = raw.trim();
            if token.is_empty() {
                return Err(CipherError::encoding(format!(
                    "missing value at position {position}"
                )));
            }
            if !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CipherError::encoding(format!(
                    "`{token}` at position {position} is not an unsigned integer"
                )));
            }
            BigUint::parse_bytes(token.as_bytes(), 10).ok_or_else(|| {
                CipherError::encoding(format!("`{token}` at position {position} is not a number"))
            })
        })
        .collect()
}

/// Renders cipher values as `[a, b, c]`.
pub fn format_cipher_list(values: &[BigUint]) -> String {
    let joined = values
        .iter()
        .map(BigUint::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
