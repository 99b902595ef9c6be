use crate::{Generator, ALPHABET, CODE_LENGTH};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::iter;
use wormhole_core::ShortCode;

/// Draws each character uniformly from [`ALPHABET`].
///
/// The RNG is pluggable so tests can seed it and get a reproducible
/// sequence of codes.
pub struct RandomGenerator<R = StdRng> {
    rng: Mutex<R>,
    length: usize,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a generator that always yields the same sequence for `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + Send + 'static> RandomGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
            length: CODE_LENGTH,
        }
    }

    /// Overrides the code length. Must stay within 1..=20 for the codes to
    /// be valid short codes.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

impl<R: RngCore + Send + 'static> Generator for RandomGenerator<R> {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let mut rng = self.rng.lock();
        let code: String =
            iter::repeat_with(|| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
                .take(self.length)
                .collect();
        ShortCode::new_unchecked(code)
    }
}
