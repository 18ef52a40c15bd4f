//! Sample data generation for tests.
//!
//! Generated data mixes sections with very different symbol statistics so
//! that trees get uneven shapes:
//! - runs of a single byte
//! - text-like data over a small alphabet
//! - short repeating patterns
//! - uniformly random bytes

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(rng.gen_range(16..=2048));

        match rng.gen_range(0..10u8) {
            // 30% runs of the same byte
            0..=2 => {
                let byte_value: u8 = rng.gen();
                data.extend(std::iter::repeat(byte_value).take(section));
            }

            // 30% limited alphabet, including header-looking delimiters
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,:\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern_len = rng.gen_range(4..=32);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }

            // 20% random bytes
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}

/// Bytes whose counts follow the Fibonacci sequence, which drives the tree
/// to its maximum depth for the number of symbols.
pub fn fibonacci_skewed(symbols: u8) -> Vec<u8> {
    let (mut a, mut b) = (1usize, 1usize);
    let mut data = Vec::new();
    for symbol in 0..symbols {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }
    data
}
