pub mod random;
pub mod seq;

use wormhole_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Symbols a generated short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// They are not required to produce unique codes: the shortener checks each
/// draw against the persisted collection and asks again on a collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
