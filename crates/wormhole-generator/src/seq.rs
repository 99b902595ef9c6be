use crate::{Generator, ALPHABET, CODE_LENGTH};
use std::sync::atomic::{AtomicU64, Ordering};
use wormhole_core::ShortCode;

/// A deterministic short code generator using a sequential counter.
///
/// The counter is rendered in base 62 over [`ALPHABET`] and left-padded to
/// [`CODE_LENGTH`], so it produces "aaaaaa", "aaaaab", ... and only grows
/// past six characters after 62^6 codes.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a new generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }

    fn encode(mut value: u64) -> String {
        let base = ALPHABET.len() as u64;
        let mut digits = Vec::with_capacity(CODE_LENGTH);
        while value > 0 {
            digits.push(ALPHABET[(value % base) as usize]);
            value /= base;
        }
        while digits.len() < CODE_LENGTH {
            digits.push(ALPHABET[0]);
        }
        digits.iter().rev().map(|&b| b as char).collect()
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(Self::encode(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::new();

        assert_eq!(generator.generate().as_str(), "aaaaaa");
        assert_eq!(generator.generate().as_str(), "aaaaab");
        assert_eq!(generator.generate().as_str(), "aaaaac");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset(62);

        assert_eq!(generator.generate().as_str(), "aaaaba");
        assert_eq!(generator.generate().as_str(), "aaaabb");
    }

    #[test]
    fn last_symbol_of_alphabet() {
        let generator = SeqGenerator::with_offset(61);
        assert_eq!(generator.generate().as_str(), "aaaaa9");
    }

    #[test]
    fn grows_past_six_characters() {
        let generator = SeqGenerator::with_offset(62_u64.pow(6));
        assert_eq!(generator.generate().as_str(), "baaaaaa");
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::new();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        // Original continues from 2
        assert_eq!(generator.generate().as_str(), "aaaaac");

        // Clone also continues from 2 (same counter value)
        assert_eq!(cloned.generate().as_str(), "aaaaac");
    }
}
