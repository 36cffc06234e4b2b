//! AES key schedule and block encryption/decryption.

use crate::block::Block;
use crate::key::{AesKey, RoundKeys, MAX_ROUNDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128- or 256-bit key into `Nr + 1` round keys.
pub fn expand_key(key: &AesKey) -> RoundKeys {
    let nk = key.as_bytes().len() / 4;
    let rounds = key.rounds();
    let total_words = 4 * (rounds + 1);

    let mut w = [0u32; 4 * (MAX_ROUNDS + 1)];
    for (slot, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        *slot = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut keys = [[0u8; 16]; MAX_ROUNDS + 1];
    for (round, round_key) in keys.iter_mut().take(rounds + 1).enumerate() {
        for (word_idx, out) in round_key.chunks_exact_mut(4).enumerate() {
            out.copy_from_slice(&w[round * 4 + word_idx].to_be_bytes());
        }
    }

    RoundKeys { keys, rounds }
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";

    fn block(hex_str: &str) -> Block {
        hex::decode(hex_str)
            .expect("valid hex")
            .try_into()
            .expect("16 bytes")
    }

    fn sequential_key<const N: usize>() -> [u8; N] {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn aes128_matches_fips_appendix_c1() {
        let round_keys = expand_key(&AesKey::from(sequential_key::<16>()));
        let ct = encrypt_block(&block(FIPS_PLAIN), &round_keys);
        assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
        assert_eq!(decrypt_block(&ct, &round_keys), block(FIPS_PLAIN));
    }

    #[test]
    fn aes256_matches_fips_appendix_c3() {
        let round_keys = expand_key(&AesKey::from(sequential_key::<32>()));
        assert_eq!(round_keys.rounds(), 14);
        let ct = encrypt_block(&block(FIPS_PLAIN), &round_keys);
        assert_eq!(hex::encode(ct), "8ea2b7ca516745bfeafc49904b496089");
        assert_eq!(decrypt_block(&ct, &round_keys), block(FIPS_PLAIN));
    }

    #[test]
    fn aes128_last_round_key_matches_fips_appendix_a1() {
        // Key 2b7e1516 28aed2a6 abf71588 09cf4f3c; w[40..44] = d014f9a8 c9ee2589 e13f0cc8 b6630ca6
        let key: [u8; 16] = hex::decode("2b7e151628aed2a6abf7158809cf4f3c")
            .expect("valid hex")
            .try_into()
            .expect("16 bytes");
        let round_keys = expand_key(&AesKey::from(key));
        assert_eq!(
            hex::encode(round_keys.get(10)),
            "d014f9a8c9ee2589e13f0cc8b6630ca6"
        );
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..64 {
            let mut key_bytes = [0u8; 32];
            let mut data = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut data);
            let rks = expand_key(&AesKey::from(key_bytes));
            let ct = encrypt_block(&data, &rks);
            assert_ne!(ct, data);
            assert_eq!(decrypt_block(&ct, &rks), data);
        }
    }
}
