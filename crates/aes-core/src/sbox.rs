//! S-box tables, computed at compile time from GF(2^8) arithmetic.

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = invert_table(&SBOX);

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
pub(crate) const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a ^= 0x1b;
        }
        b >>= 1;
        i += 1;
    }
    product
}

// a^254 == a^-1 for non-zero a; zero maps to zero.
const fn gf_inverse(a: u8) -> u8 {
    let mut result = 1u8;
    let mut base = a;
    let mut exp = 254u8;
    while exp > 0 {
        if exp & 1 != 0 {
            result = gmul(result, base);
        }
        base = gmul(base, base);
        exp >>= 1;
    }
    if a == 0 {
        0
    } else {
        result
    }
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = gf_inverse(i as u8);
        table[i] = b
            ^ b.rotate_left(1)
            ^ b.rotate_left(2)
            ^ b.rotate_left(3)
            ^ b.rotate_left(4)
            ^ 0x63;
        i += 1;
    }
    table
}

const fn invert_table(table: &[u8; 256]) -> [u8; 256] {
    let mut inverse = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

/// Forward S-box lookup.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Inverse S-box lookup.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_matches_fips_table() {
        let expected = [
            0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7,
            0xab, 0x76,
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(sbox(i as u8), *want, "sbox({i:#04x})");
        }
        assert_eq!(sbox(0x53), 0xed);
    }

    #[test]
    fn inverse_undoes_forward() {
        for b in 0u16..=255 {
            assert_eq!(inv_sbox(sbox(b as u8)), b as u8);
        }
    }

    #[test]
    fn gmul_matches_fips_example() {
        // FIPS-197 section 4.2: {57} * {13} = {fe}
        assert_eq!(gmul(0x57, 0x13), 0xfe);
    }
}
