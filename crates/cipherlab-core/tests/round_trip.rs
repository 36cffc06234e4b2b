use std::sync::Arc;
use std::thread;

use cipherlab_core::rsa::{decrypt, encrypt, generate_key_pair_with};
use cipherlab_core::{
    rail_fence, AesEcb, KeyGenOptions, Mode, RailFence, RailKey, TextCipher, ToyRsa, Vigenere,
};
use num_bigint::BigUint;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

proptest! {
    #[test]
    fn prop_rail_fence_round_trip(text in "\\PC{0,64}", rows in 1usize..80) {
        let key = RailKey::new(rows).unwrap();
        let encoded = rail_fence::encode(&text, key);
        prop_assert_eq!(encoded.chars().count(), text.chars().count());
        prop_assert_eq!(rail_fence::decode(&encoded, key), text);
    }

    #[test]
    fn prop_rail_fence_wide_key_is_identity(text in "[a-zA-Z ]{0,32}", extra in 0usize..8) {
        let key = RailKey::new(text.chars().count().max(1) + extra).unwrap();
        prop_assert_eq!(rail_fence::encode(&text, key), text);
    }

    #[test]
    fn prop_vigenere_round_trip_upper_case(text in "[A-Z0-9 ,.!?]{0,64}", key in "[a-zA-Z]{1,12}") {
        let cipher = Vigenere::new(&key).unwrap();
        let encoded = cipher.encode(&text).unwrap();
        prop_assert_eq!(cipher.decode(&encoded).unwrap(), text);
    }

    #[test]
    fn prop_vigenere_keeps_non_letters_in_place(text in "\\PC{0,48}", key in "[A-Z]{1,8}") {
        let encoded = Vigenere::new(&key).unwrap().encode(&text).unwrap();
        for (before, after) in text.chars().zip(encoded.chars()) {
            if !before.is_ascii_alphabetic() {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_rsa_round_trip_and_inverse(text in "[ -~]{0,24}", seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let keys = generate_key_pair_with(&mut rng, 17u32, 19u32, &KeyGenOptions::default()).unwrap();
        let product = keys.public.e() * keys.private.d();
        prop_assert_eq!(product % keys.phi(), BigUint::from(1u8));
        let cipher = encrypt(&keys.public, &text);
        prop_assert_eq!(decrypt(&keys.private, &cipher).unwrap(), text);
    }

    #[test]
    fn prop_aes_round_trip(text in "\\PC{0,80}", password in "\\PC{1,16}") {
        let aes = AesEcb::new(&password).unwrap();
        let encoded = aes.encode(&text).unwrap();
        prop_assert_eq!(aes.decode(&encoded).unwrap(), text);
    }
}

#[test]
fn rsa_primes_from_the_classroom_form() {
    for (p, q) in [(17u32, 19u32), (61, 53), (11, 13), (101, 103)] {
        let mut rng = ChaCha20Rng::seed_from_u64(u64::from(p * q));
        let keys = generate_key_pair_with(&mut rng, p, q, &KeyGenOptions::default()).unwrap();
        let text = "Ab";
        assert_eq!(decrypt(&keys.private, &encrypt(&keys.public, text)).unwrap(), text);
    }
}

#[test]
fn transforms_dispatch_on_mode() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let rsa_keys = generate_key_pair_with(&mut rng, 61u32, 53u32, &KeyGenOptions::default()).unwrap();
    let ciphers: Vec<Box<dyn TextCipher>> = vec![
        Box::new(RailFence::new(3).unwrap()),
        Box::new(Vigenere::new("LEMON").unwrap()),
        Box::new(ToyRsa::new(rsa_keys)),
        Box::new(AesEcb::new("classroom").unwrap()),
    ];
    for cipher in &ciphers {
        let encoded = cipher.apply(Mode::Encrypt, "ATTACK AT DAWN").unwrap();
        let decoded = cipher.apply(Mode::Decrypt, &encoded).unwrap();
        assert_eq!(decoded, "ATTACK AT DAWN", "{}", cipher.name());
    }
}

#[test]
fn transforms_are_shareable_across_threads() {
    let cipher: Arc<dyn TextCipher> = Arc::new(AesEcb::new("shared").unwrap());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cipher = Arc::clone(&cipher);
            thread::spawn(move || {
                let text = format!("message number {i}");
                let encoded = cipher.encode(&text).unwrap();
                (text, cipher.decode(&encoded).unwrap())
            })
        })
        .collect();
    for handle in handles {
        let (sent, received) = handle.join().unwrap();
        assert_eq!(sent, received);
    }
}
