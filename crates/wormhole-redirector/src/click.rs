use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use wormhole_core::{Location, TrafficSource};

/// Placeholder visit metadata attached to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickMetadata {
    pub source: TrafficSource,
    pub location: Location,
    /// Random suffix that keeps click ids distinct within one millisecond.
    pub nonce: u32,
}

/// Supplies metadata for new clicks.
///
/// No real referrer or geolocation lookup happens anywhere; implementations
/// fabricate the values.
pub trait ClickMetadataSource: Send + Sync + 'static {
    fn draw(&self) -> ClickMetadata;
}

/// Picks source and location uniformly from their fixed category sets.
pub struct RandomClickMetadata<R = StdRng> {
    rng: Mutex<R>,
}

impl RandomClickMetadata<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomClickMetadata<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + Send + 'static> RandomClickMetadata<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send + 'static> ClickMetadataSource for RandomClickMetadata<R> {
    fn draw(&self) -> ClickMetadata {
        let mut rng = self.rng.lock();
        ClickMetadata {
            source: TrafficSource::ALL[rng.random_range(0..TrafficSource::ALL.len())],
            location: Location::ALL[rng.random_range(0..Location::ALL.len())],
            nonce: rng.random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_metadata() {
        let a = RandomClickMetadata::from_seed(9);
        let b = RandomClickMetadata::from_seed(9);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn covers_every_category() {
        let source = RandomClickMetadata::from_seed(11);
        let mut sources = HashSet::new();
        let mut locations = HashSet::new();
        for _ in 0..500 {
            let metadata = source.draw();
            sources.insert(metadata.source);
            locations.insert(metadata.location);
        }
        assert_eq!(sources.len(), TrafficSource::ALL.len());
        assert_eq!(locations.len(), Location::ALL.len());
    }
}
