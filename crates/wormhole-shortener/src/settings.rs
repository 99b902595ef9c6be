use typed_builder::TypedBuilder;
use wormhole_core::DEFAULT_VALIDITY_MINUTES;

/// Base every short URL is built on unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://url-shortener-8g5h.onrender.com";

#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Prefix of every short URL; the short code is appended after a `/`.
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    /// Window applied when a request has no positive validity of its own.
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: i64,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
