//! Integer helpers for the toy RSA key generator.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = std::mem::replace(&mut b, r);
    }
    a
}

/// Inverse of `value` modulo `modulus` via the extended Euclidean algorithm.
///
/// The Bézout coefficient is normalised into `[0, modulus)`. Returns `None`
/// when `gcd(value, modulus) != 1` or the modulus is zero.
pub fn modular_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }
    let m = BigInt::from(modulus.clone());

    // Invariant: old_r == old_s * value (mod m), likewise for r and s.
    let mut old_r = BigInt::from(value.clone());
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }
    old_s.mod_floor(&m).to_biguint()
}

/// Trial-division primality check for values that fit in a `u64`.
///
/// Larger values are reported as prime without checking; only used to warn
/// about obviously bad inputs.
pub fn looks_prime(value: &BigUint) -> bool {
    let Some(n) = value.to_u64() else {
        return true;
    };
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3u64;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
