//! Error types shared by every transform.

use std::fmt;

use thiserror::Error;

/// Result alias for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;

/// Failure raised at a transform's operation boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CipherError {
    /// Invalid key, prime or length parameter.
    #[error("invalid parameter: {0}")]
    Parameter(String),

    /// Malformed transport encoding (base64, integer list, block length).
    #[error("malformed input: {0}")]
    Encoding(String),

    /// Ciphertext did not validate under the supplied key.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Modular arithmetic had no defined result.
    #[error("arithmetic failure: {0}")]
    Arithmetic(String),
}

/// Coarse classification of a [`CipherError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`CipherError::Parameter`].
    Parameter,
    /// See [`CipherError::Encoding`].
    Encoding,
    /// See [`CipherError::Decryption`].
    Decryption,
    /// See [`CipherError::Arithmetic`].
    Arithmetic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Parameter => "ParameterError",
            ErrorKind::Encoding => "EncodingError",
            ErrorKind::Decryption => "DecryptionError",
            ErrorKind::Arithmetic => "ArithmeticError",
        };
        f.write_str(label)
    }
}

impl CipherError {
    pub(crate) fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    pub(crate) fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub(crate) fn decryption(msg: impl Into<String>) -> Self {
        Self::Decryption(msg.into())
    }

    pub(crate) fn arithmetic(msg: impl Into<String>) -> Self {
        Self::Arithmetic(msg.into())
    }

    /// Returns the error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::Parameter(_) => ErrorKind::Parameter,
            CipherError::Encoding(_) => ErrorKind::Encoding,
            CipherError::Decryption(_) => ErrorKind::Decryption,
            CipherError::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }

    /// Returns the diagnostic message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CipherError::Parameter(msg)
            | CipherError::Encoding(msg)
            | CipherError::Decryption(msg)
            | CipherError::Arithmetic(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_message_are_split() {
        let err = CipherError::parameter("rail key must be at least 1");
        assert_eq!(err.kind(), ErrorKind::Parameter);
        assert_eq!(err.message(), "rail key must be at least 1");
        assert_eq!(err.kind().to_string(), "ParameterError");
        assert_eq!(err.to_string(), "invalid parameter: rail key must be at least 1");
    }
}
