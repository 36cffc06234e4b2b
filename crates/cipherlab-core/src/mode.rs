//! Mode selector and the uniform text transform contract.

use std::fmt;
use std::str::FromStr;

use crate::error::{CipherError, Result};

/// Direction of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Plain text in, cipher text out.
    Encrypt,
    /// Cipher text in, plain text out.
    Decrypt,
}

impl FromStr for Mode {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(Mode::Encrypt),
            "decrypt" => Ok(Mode::Decrypt),
            other => Err(CipherError::parameter(format!(
                "unknown mode `{other}`, expected `encrypt` or `decrypt`"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encrypt => f.write_str("encrypt"),
            Mode::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// A keyed, stateless transform between text values.
///
/// Implementations hold only their validated key material, so a single value
/// may be shared across threads and invoked concurrently.
pub trait TextCipher: Send + Sync {
    /// Short label used when recording submissions.
    fn name(&self) -> &'static str;

    /// Encrypts `text`.
    fn encode(&self, text: &str) -> Result<String>;

    /// Decrypts `text`.
    fn decode(&self, text: &str) -> Result<String>;

    /// Dispatches to [`encode`](Self::encode) or [`decode`](Self::decode).
    fn apply(&self, mode: Mode, text: &str) -> Result<String> {
        match mode {
            Mode::Encrypt => self.encode(text),
            Mode::Decrypt => self.decode(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_form_values() {
        assert_eq!("encrypt".parse::<Mode>().unwrap(), Mode::Encrypt);
        assert_eq!(" Decrypt ".parse::<Mode>().unwrap(), Mode::Decrypt);
        let err = "sign".parse::<Mode>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parameter);
    }
}
