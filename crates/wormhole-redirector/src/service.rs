use std::sync::Arc;

use crate::click::ClickMetadataSource;
use crate::redirector::{Redirector, Resolution};
use async_trait::async_trait;
use tracing::{debug, info, trace, warn};
use wormhole_core::{ClickEvent, Clock, LoadStatus, SystemClock, UrlStore};

/// Service for handling URL redirects.
///
/// Each resolution is a read-modify-write over the whole store: load,
/// append the click to the matched record, save. Two overlapping calls can
/// lose one of the clicks; there is a single writer by assumption.
#[derive(Debug)]
pub struct RedirectorService<S, M, C = SystemClock> {
    store: Arc<S>,
    metadata: Arc<M>,
    clock: Arc<C>,
}

impl<S, M, C> Clone for RedirectorService<S, M, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metadata: Arc::clone(&self.metadata),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: UrlStore, M: ClickMetadataSource> RedirectorService<S, M, SystemClock> {
    /// Creates a new RedirectorService with the given store.
    pub fn new(store: S, metadata: M) -> Self {
        Self::with_clock(store, metadata, SystemClock)
    }
}

impl<S: UrlStore, M: ClickMetadataSource, C: Clock> RedirectorService<S, M, C> {
    pub fn with_clock(store: S, metadata: M, clock: C) -> Self {
        Self {
            store: Arc::new(store),
            metadata: Arc::new(metadata),
            clock: Arc::new(clock),
        }
    }

    /// Resolves a short code to its original URL, recording a click.
    ///
    /// # Arguments
    ///
    /// * `code` - The short code to resolve
    /// * `user_agent` - The visitor's user-agent string, if known
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution::Redirect(url))` - The original URL if found and not expired
    /// * `Ok(Resolution::NotFound)` - If the code doesn't exist or has expired
    /// * `Err(e)` - If the updated collection could not be written
    pub async fn record_click(
        &self,
        code: &str,
        user_agent: Option<String>,
    ) -> crate::Result<Resolution> {
        Redirector::record_click(self, code, user_agent).await
    }
}

#[async_trait]
impl<S: UrlStore, M: ClickMetadataSource, C: Clock> Redirector for RedirectorService<S, M, C> {
    async fn record_click(
        &self,
        code: &str,
        user_agent: Option<String>,
    ) -> crate::Result<Resolution> {
        trace!(code = %code, "recording click");

        let snapshot = self.store.load().await;
        if snapshot.status == LoadStatus::EmptyOnCorruption {
            warn!("stored urls were unreadable, nothing can resolve");
        }

        let now = self.clock.now();
        let mut records = snapshot.into_fresh_records(now);

        let Some(record) = records.iter_mut().find(|r| r.short_code == *code) else {
            warn!(code = %code, "short code not found");
            return Ok(Resolution::NotFound);
        };

        if record.expired {
            warn!(code = %code, expires_at = %record.expires_at, "attempted to access expired url");
            return Ok(Resolution::NotFound);
        }

        let metadata = self.metadata.draw();
        record.clicks.push(ClickEvent {
            id: format!("{}-{}", now.as_millisecond(), metadata.nonce),
            timestamp: now,
            source: metadata.source,
            location: metadata.location,
            user_agent,
        });

        let original_url = record.original_url.clone();
        let click_count = record.clicks.len();

        self.store.save(&records).await?;

        info!(code = %code, click_count, "click recorded");
        debug!(code = %code, url = %original_url, "resolved short code");
        Ok(Resolution::Redirect(original_url))
    }
}
