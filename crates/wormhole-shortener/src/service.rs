use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, trace, warn};
use wormhole_core::{
    Clock, CreationRequest, LoadStatus, ShortCode, Shortener, ShortenerError, SystemClock,
    UrlRecord, UrlStore,
};
use wormhole_generator::Generator;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `UrlStore` and a `Generator` to handle:
/// - Short code selection (custom when free, generated otherwise)
/// - Expiry computation
/// - One whole-collection write per batch
///
/// Requests are expected to have passed [`validate_urls`](crate::validate_urls)
/// already; the URL itself is stored as given.
#[derive(Debug)]
pub struct ShortenerService<S, G, C = SystemClock> {
    store: Arc<S>,
    generator: Arc<G>,
    clock: Arc<C>,
    settings: ShortenerSettings,
}

impl<S, G, C> Clone for ShortenerService<S, G, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
            settings: self.settings.clone(),
        }
    }
}

impl<S: UrlStore, G: Generator> ShortenerService<S, G, SystemClock> {
    /// Creates a new `ShortenerService` on the system clock.
    pub fn new(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self::with_clock(store, generator, settings, SystemClock)
    }
}

impl<S: UrlStore, G: Generator, C: Clock> ShortenerService<S, G, C> {
    pub fn with_clock(store: S, generator: G, settings: ShortenerSettings, clock: C) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            clock: Arc::new(clock),
            settings,
        }
    }

    /// Uses the request's custom code if nobody holds it yet, otherwise
    /// draws from the generator until a free code comes up.
    fn pick_code(&self, request: &CreationRequest, taken: &HashSet<String>) -> ShortCode {
        if let Some(custom) = request.custom_shortcode() {
            if !taken.contains(custom) {
                return ShortCode::new_unchecked(custom);
            }
            warn!(code = %custom, "custom short code already taken, generating one instead");
        }

        loop {
            let code: ShortCode = self.generator.generate().into();
            if !taken.contains(code.as_str()) {
                return code;
            }
            trace!(code = %code, "generated short code collided, retrying");
        }
    }

    fn validity_minutes(&self, requested: Option<i64>) -> i64 {
        requested
            .filter(|minutes| *minutes > 0)
            .unwrap_or(self.settings.default_validity_minutes)
    }
}

/// Computes `created_at + minutes`, refusing windows jiff cannot represent.
fn expiry(created_at: Timestamp, minutes: i64) -> Result<Timestamp, ShortenerError> {
    minutes
        .checked_mul(60)
        .map(SignedDuration::from_secs)
        .and_then(|window| created_at.checked_add(window).ok())
        .ok_or(ShortenerError::ValidityOutOfRange(minutes))
}

#[async_trait]
impl<S: UrlStore, G: Generator, C: Clock> Shortener for ShortenerService<S, G, C> {
    async fn create_shortened_urls(
        &self,
        requests: &[CreationRequest],
    ) -> Result<Vec<UrlRecord>, ShortenerError> {
        info!(request_count = requests.len(), "creating shortened urls");

        let snapshot = self.store.load().await;
        if snapshot.status == LoadStatus::EmptyOnCorruption {
            warn!("stored urls were unreadable, the new batch will replace them");
        }

        let mut records = snapshot.into_fresh_records(self.clock.now());
        let mut taken: HashSet<String> = records
            .iter()
            .map(|record| record.short_code.as_str().to_owned())
            .collect();
        let mut created = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            let short_code = self.pick_code(request, &taken);
            taken.insert(short_code.as_str().to_owned());

            let validity_minutes = self.validity_minutes(request.validity_minutes);
            let created_at = self.clock.now();
            let expires_at = expiry(created_at, validity_minutes)?;

            let record = UrlRecord {
                id: format!("{}-{}", created_at.as_millisecond(), index),
                original_url: request.original_url.clone(),
                short_url: short_code.to_url(&self.settings.base_url),
                short_code,
                created_at,
                expires_at,
                validity_minutes,
                clicks: Vec::new(),
                expired: false,
            };

            info!(
                code = %record.short_code,
                original_url = %record.original_url,
                expires_at = %record.expires_at,
                "created shortened url"
            );
            created.push(record);
        }

        records.extend(created.iter().cloned());
        self.store.save(&records).await?;

        info!(total_count = records.len(), "saved urls to storage");
        Ok(created)
    }

    async fn list(&self) -> Vec<UrlRecord> {
        let snapshot = self.store.load().await;
        if snapshot.status == LoadStatus::EmptyOnCorruption {
            warn!("stored urls were unreadable, listing nothing");
        }
        snapshot.into_fresh_records(self.clock.now())
    }
}
