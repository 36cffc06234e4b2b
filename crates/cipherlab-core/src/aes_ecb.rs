//! Password-keyed AES-256 in ECB mode with PKCS#7 padding and base64 text.
//!
//! The key is the SHA-256 digest of the password, so equal passwords always
//! give equal keys. ECB encrypts every block independently and repeated plain
//! text blocks show up as repeated cipher text blocks.

use aes_core::{decrypt_block, encrypt_block, expand_key, AesKey, Block, RoundKeys, BLOCK_SIZE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::{CipherError, Result};
use crate::mode::TextCipher;

/// Derives the AES-256 key for `password`.
pub fn derive_key(password: &str) -> Result<AesKey> {
    if password.is_empty() {
        return Err(CipherError::parameter("AES password must not be empty"));
    }
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    Ok(AesKey::from(key))
}

fn pad(data: &[u8]) -> Vec<u8> {
    let fill = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + fill);
    padded.extend_from_slice(data);
    padded.resize(data.len() + fill, fill as u8);
    padded
}

fn unpad(mut data: Vec<u8>) -> Result<Vec<u8>> {
    let invalid = || CipherError::decryption("invalid padding (wrong password?)");
    let fill = *data.last().ok_or_else(invalid)? as usize;
    if fill == 0 || fill > BLOCK_SIZE || fill > data.len() {
        return Err(invalid());
    }
    let body_len = data.len() - fill;
    if data[body_len..].iter().any(|&b| b as usize != fill) {
        return Err(invalid());
    }
    data.truncate(body_len);
    Ok(data)
}

fn apply_blocks(data: &mut [u8], op: impl Fn(&Block) -> Block) {
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        chunk.copy_from_slice(&op(&block));
    }
}

/// AES-ECB transform bound to a password-derived key.
#[derive(Clone, Debug)]
pub struct AesEcb {
    round_keys: RoundKeys,
}

impl AesEcb {
    /// Derives the key schedule for `password`.
    pub fn new(password: &str) -> Result<Self> {
        Ok(Self {
            round_keys: expand_key(&derive_key(password)?),
        })
    }

    /// Encrypts raw bytes, returning padded cipher bytes.
    pub fn encrypt_bytes(&self, plain: &[u8]) -> Vec<u8> {
        let mut data = pad(plain);
        apply_blocks(&mut data, |block| encrypt_block(block, &self.round_keys));
        data
    }

    /// Decrypts padded cipher bytes.
    pub fn decrypt_bytes(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        if cipher.is_empty() || cipher.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::encoding(format!(
                "cipher text length {} is not a positive multiple of {BLOCK_SIZE}",
                cipher.len()
            )));
        }
        let mut data = cipher.to_vec();
        apply_blocks(&mut data, |block| decrypt_block(block, &self.round_keys));
        unpad(data)
    }
}

impl TextCipher for AesEcb {
    fn name(&self) -> &'static str {
        "aes-ecb"
    }

    fn encode(&self, text: &str) -> Result<String> {
        Ok(STANDARD.encode(self.encrypt_bytes(text.as_bytes())))
    }

    fn decode(&self, text: &str) -> Result<String> {
        let cipher = STANDARD
            .decode(text.trim())
            .map_err(|err| CipherError::encoding(format!("invalid base64: {err}")))?;
        let plain = self.decrypt_bytes(&cipher)?;
        String::from_utf8(plain)
            .map_err(|_| CipherError::decryption("plain text is not valid UTF-8 (wrong password?)"))
    }
}

/// Encrypts `plain` under `password`, returning base64 text.
pub fn encode(plain: &str, password: &str) -> Result<String> {
    AesEcb::new(password)?.encode(plain)
}

/// Decrypts base64 `cipher` under `password`.
pub fn decode(cipher: &str, password: &str) -> Result<String> {
    AesEcb::new(password)?.decode(cipher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn key_is_sha256_of_password() {
        // SHA-256("abc")
        let key = derive_key("abc").unwrap();
        let expected: [u8; 32] = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(key, AesKey::Aes256(expected));
    }

    #[test]
    fn round_trips_text() {
        for text in ["", "a", "exactly16bytes!!", "Rahasia negara: 42 ✓"] {
            let cipher = encode(text, "hunter2").unwrap();
            assert_eq!(decode(&cipher, "hunter2").unwrap(), text);
        }
    }

    #[test]
    fn output_is_whole_blocks() {
        let aes = AesEcb::new("pw").unwrap();
        assert_eq!(aes.encrypt_bytes(b"").len(), 16);
        assert_eq!(aes.encrypt_bytes(&[0u8; 15]).len(), 16);
        assert_eq!(aes.encrypt_bytes(&[0u8; 16]).len(), 32);
    }

    #[test]
    fn same_password_is_deterministic() {
        assert_eq!(encode("secret", "pw").unwrap(), encode("secret", "pw").unwrap());
        assert_ne!(encode("secret", "pw").unwrap(), encode("secret", "pw2").unwrap());
    }

    #[test]
    fn repeated_blocks_leak() {
        let aes = AesEcb::new("pw").unwrap();
        let cipher = aes.encrypt_bytes(b"YELLOW SUBMARINEYELLOW SUBMARINE");
        assert_eq!(cipher[..16], cipher[16..32]);
    }

    #[test]
    fn wrong_password_never_returns_the_plain_text() {
        let cipher = encode("meet me at noon", "right").unwrap();
        match decode(&cipher, "wrong") {
            Ok(text) => assert_ne!(text, "meet me at noon"),
            Err(err) => assert_eq!(err.kind(), ErrorKind::Decryption),
        }
    }

    #[test]
    fn malformed_input_is_an_encoding_error() {
        assert_eq!(decode("not base64!", "pw").unwrap_err().kind(), ErrorKind::Encoding);
        // valid base64, 5 bytes
        assert_eq!(decode("aGVsbG8=", "pw").unwrap_err().kind(), ErrorKind::Encoding);
        assert_eq!(decode("", "pw").unwrap_err().kind(), ErrorKind::Encoding);
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(encode("x", "").unwrap_err().kind(), ErrorKind::Parameter);
    }

    #[test]
    fn unpad_rejects_bad_padding() {
        assert!(unpad(vec![1, 2, 3, 0]).is_err());
        assert!(unpad(vec![1, 2, 3, 17]).is_err());
        assert!(unpad(vec![1, 2, 2, 3]).is_err());
        assert!(unpad(vec![]).is_err());
        assert_eq!(unpad(vec![9, 2, 2]).unwrap(), vec![9]);
    }
}
