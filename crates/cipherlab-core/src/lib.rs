//! Classical and textbook cipher transforms for teaching.
//!
//! Four independent, stateless transforms, each with an encode and a decode
//! direction:
//! - [`rail_fence`]: zigzag transposition over a fixed number of rails.
//! - [`vigenere`]: polyalphabetic shift keyed by a repeating word.
//! - [`rsa`]: textbook RSA on individual code points with two-digit primes.
//! - [`aes_ecb`]: AES-256 in ECB mode keyed by a password hash.
//!
//! None of these offer real confidentiality. They reproduce classroom
//! behavior, weaknesses included.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aes_ecb;
pub mod cipher_list;
mod error;
mod mode;
pub mod numeric;
pub mod rail_fence;
pub mod rsa;
pub mod vigenere;

pub use crate::aes_ecb::AesEcb;
pub use crate::cipher_list::{format_cipher_list, parse_cipher_list};
pub use crate::error::{CipherError, ErrorKind, Result};
pub use crate::mode::{Mode, TextCipher};
pub use crate::rail_fence::{RailFence, RailKey};
pub use crate::rsa::{KeyGenOptions, KeyPair, PrivateKey, PublicKey, ToyRsa};
pub use crate::vigenere::{CasePolicy, Vigenere};
