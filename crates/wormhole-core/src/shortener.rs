use crate::error::ShortenerError;
use crate::record::UrlRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, ShortenerError>;

/// A single row of a creation batch, as entered by the user.
///
/// Nothing here is validated; see `wormhole_shortener::validate_urls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRequest {
    /// The original URL to be shortened.
    pub original_url: String,
    /// Minutes the short URL stays resolvable. Absent or non-positive
    /// values fall back to the default window.
    #[serde(default)]
    pub validity_minutes: Option<i64>,
    /// Preferred short code. Replaced by a generated one if already taken.
    #[serde(default)]
    pub custom_shortcode: Option<String>,
}

impl CreationRequest {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_shortcode(mut self, code: impl Into<String>) -> Self {
        self.custom_shortcode = Some(code.into());
        self
    }

    /// The custom short code, if one was given and is non-empty.
    pub fn custom_shortcode(&self) -> Option<&str> {
        self.custom_shortcode.as_deref().filter(|code| !code.is_empty())
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates one record per request, in input order, and persists them
    /// together with the existing collection in a single write.
    async fn create_shortened_urls(&self, requests: &[CreationRequest]) -> Result<Vec<UrlRecord>>;

    /// Returns every persisted record with a freshly computed `expired` flag.
    async fn list(&self) -> Vec<UrlRecord>;
}
