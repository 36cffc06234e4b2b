//! Textbook RSA over single characters.
//!
//! Each character's code point is raised to the public exponent on its own;
//! there is no padding and no block packing. Code points at or above the
//! modulus collide after reduction and cannot be recovered. Choosing `p == q`
//! yields a square modulus whose `phi` formula is wrong, so decryption may
//! silently return the wrong characters. Both limits are left in place.

use log::{debug, warn};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive};
use rand::Rng;

use crate::cipher_list::{format_cipher_list, parse_cipher_list};
use crate::error::{CipherError, Result};
use crate::mode::TextCipher;
use crate::numeric::{gcd, looks_prime, modular_inverse};

/// Default cap on random exponent draws before the deterministic scan.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Public half `(e, n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    e: BigUint,
    n: BigUint,
}

impl PublicKey {
    /// Builds a public key from caller supplied values.
    pub fn new(e: BigUint, n: BigUint) -> Result<Self> {
        check_modulus(&n)?;
        Ok(Self { e, n })
    }

    /// Public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

/// Private half `(d, n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    d: BigUint,
    n: BigUint,
}

impl PrivateKey {
    /// Builds a private key from caller supplied values.
    pub fn new(d: BigUint, n: BigUint) -> Result<Self> {
        check_modulus(&n)?;
        Ok(Self { d, n })
    }

    /// Private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }
}

fn check_modulus(n: &BigUint) -> Result<()> {
    if n < &BigUint::from(2u8) {
        return Err(CipherError::parameter(format!(
            "RSA modulus must be at least 2, got {n}"
        )));
    }
    Ok(())
}

/// Key pair derived from two primes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    /// Encryption key.
    pub public: PublicKey,
    /// Decryption key.
    pub private: PrivateKey,
    phi: BigUint,
}

impl KeyPair {
    /// `(p - 1)(q - 1)` for the primes the pair was built from.
    pub fn phi(&self) -> &BigUint {
        &self.phi
    }
}

/// Tuning for key generation.
#[derive(Clone, Debug)]
pub struct KeyGenOptions {
    /// Random draws of `e` before falling back to an upward scan.
    pub max_attempts: usize,
}

impl Default for KeyGenOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Picks `e` with `1 < e < phi` and `gcd(e, phi) == 1`.
///
/// Draws uniformly from `[2, phi)` up to `max_attempts` times, then scans
/// upward from 2. `phi - 1` is always coprime to `phi`, so the scan terminates
/// whenever `phi > 2`.
pub fn choose_e<R: Rng + ?Sized>(
    rng: &mut R,
    phi: &BigUint,
    options: &KeyGenOptions,
) -> Result<BigUint> {
    let low = BigUint::from(2u8);
    if phi <= &low {
        return Err(CipherError::parameter(format!(
            "phi = {phi} leaves no exponent with 1 < e < phi"
        )));
    }

    for attempt in 1..=options.max_attempts {
        let candidate = rng.gen_biguint_range(&low, phi);
        if gcd(&candidate, phi).is_one() {
            debug!("chose e = {candidate} after {attempt} draw(s)");
            return Ok(candidate);
        }
    }

    warn!(
        "no coprime exponent in {} random draws for phi = {phi}; scanning",
        options.max_attempts
    );
    let mut candidate = low;
    while &candidate < phi {
        if gcd(&candidate, phi).is_one() {
            return Ok(candidate);
        }
        candidate += 1u8;
    }
    Err(CipherError::arithmetic(format!(
        "no exponent coprime to phi = {phi}"
    )))
}

/// Generates a key pair from `p` and `q` using the thread-local RNG.
pub fn generate_key_pair(p: impl Into<BigUint>, q: impl Into<BigUint>) -> Result<KeyPair> {
    generate_key_pair_with(&mut rand::thread_rng(), p, q, &KeyGenOptions::default())
}

/// Generates a key pair from `p` and `q` with an explicit RNG and options.
///
/// Primality is not enforced; non-prime inputs only produce a warning.
pub fn generate_key_pair_with<R: Rng + ?Sized>(
    rng: &mut R,
    p: impl Into<BigUint>,
    q: impl Into<BigUint>,
    options: &KeyGenOptions,
) -> Result<KeyPair> {
    let p = p.into();
    let q = q.into();
    let two = BigUint::from(2u8);
    if p < two || q < two {
        return Err(CipherError::parameter(format!(
            "RSA primes must be at least 2, got p = {p}, q = {q}"
        )));
    }
    for value in [&p, &q] {
        if !looks_prime(value) {
            warn!("{value} is not prime; the key pair will not round-trip");
        }
    }
    if p == q {
        warn!("p == q ({p}); the modulus is a perfect square");
    }

    let one = BigUint::one();
    let n = &p * &q;
    let phi = (&p - &one) * (&q - &one);
    let e = choose_e(rng, &phi, options)?;
    let d = modular_inverse(&e, &phi).ok_or_else(|| {
        CipherError::arithmetic(format!("e = {e} has no inverse modulo phi = {phi}"))
    })?;
    debug!("generated key pair n = {n}, e = {e}");

    Ok(KeyPair {
        public: PublicKey { e, n: n.clone() },
        private: PrivateKey { d, n },
        phi,
    })
}

/// Encrypts each character of `plain` independently.
pub fn encrypt(key: &PublicKey, plain: &str) -> Vec<BigUint> {
    let mut clipped = false;
    let cipher = plain
        .chars()
        .map(|ch| {
            let m = BigUint::from(u32::from(ch));
            if m >= key.n {
                clipped = true;
            }
            m.modpow(&key.e, &key.n)
        })
        .collect();
    if clipped {
        warn!(
            "plain text contains code points >= n = {}; they will not decrypt",
            key.n
        );
    }
    cipher
}

/// Decrypts values produced by [`encrypt`].
///
/// Values from elsewhere decode to arbitrary characters; only results that are
/// not Unicode scalar values are reported as errors.
pub fn decrypt(key: &PrivateKey, cipher: &[BigUint]) -> Result<String> {
    cipher
        .iter()
        .enumerate()
        .map(|(position, c)| {
            let m = c.modpow(&key.d, &key.n);
            m.to_u32().and_then(char::from_u32).ok_or_else(|| {
                CipherError::decryption(format!(
                    "value at position {position} decrypts to {m}, not a character"
                ))
            })
        })
        .collect()
}

/// Adapter exposing RSA keys through [`TextCipher`], using the bracketed
/// integer list as the cipher text form.
///
/// Either half may be absent; using the missing direction is a parameter error.
#[derive(Clone, Debug)]
pub struct ToyRsa {
    public: Option<PublicKey>,
    private: Option<PrivateKey>,
}

impl ToyRsa {
    /// Wraps both halves of a generated pair.
    pub fn new(keys: KeyPair) -> Self {
        Self {
            public: Some(keys.public),
            private: Some(keys.private),
        }
    }

    /// Encrypt-only adapter.
    pub fn public_only(key: PublicKey) -> Self {
        Self {
            public: Some(key),
            private: None,
        }
    }

    /// Decrypt-only adapter.
    pub fn private_only(key: PrivateKey) -> Self {
        Self {
            public: None,
            private: Some(key),
        }
    }
}

impl TextCipher for ToyRsa {
    fn name(&self) -> &'static str {
        "rsa"
    }

    fn encode(&self, text: &str) -> Result<String> {
        let key = self
            .public
            .as_ref()
            .ok_or_else(|| CipherError::parameter("no RSA public key supplied"))?;
        Ok(format_cipher_list(&encrypt(key, text)))
    }

    fn decode(&self, text: &str) -> Result<String> {
        let key = self
            .private
            .as_ref()
            .ok_or_else(|| CipherError::parameter("no RSA private key supplied"))?;
        decrypt(key, &parse_cipher_list(text)?)
    }
}
