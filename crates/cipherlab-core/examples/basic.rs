//! Runs every transform over the same message and checks each round trip.

use cipherlab_core::rsa::generate_key_pair;
use cipherlab_core::{AesEcb, RailFence, TextCipher, ToyRsa, Vigenere};

fn main() {
    let message = "HELLO WORLD";
    let keys = generate_key_pair(17u32, 19u32).expect("17 and 19 are valid primes");
    println!(
        "rsa public = ({}, {}), private = ({}, {})",
        keys.public.e(),
        keys.public.n(),
        keys.private.d(),
        keys.private.n()
    );

    let ciphers: Vec<Box<dyn TextCipher>> = vec![
        Box::new(RailFence::new(3).expect("rail key")),
        Box::new(Vigenere::new("LEMON").expect("vigenere key")),
        Box::new(ToyRsa::new(keys)),
        Box::new(AesEcb::new("classroom").expect("password")),
    ];

    for cipher in &ciphers {
        let encoded = cipher.encode(message).expect("encode");
        let decoded = cipher.decode(&encoded).expect("decode");
        assert_eq!(decoded, message);
        println!("{:>10}: {encoded}", cipher.name());
    }
}
