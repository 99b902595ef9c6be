use crate::Result;
use async_trait::async_trait;

/// Outcome of resolving a short code.
///
/// Unknown and expired codes both map to `NotFound`; callers cannot tell
/// them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The original URL to send the visitor to.
    Redirect(String),
    NotFound,
}

impl Resolution {
    pub fn into_url(self) -> Option<String> {
        match self {
            Resolution::Redirect(url) => Some(url),
            Resolution::NotFound => None,
        }
    }
}

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code and records a click against it.
    /// Returns [`Resolution::NotFound`] if the code does not exist or has expired.
    async fn record_click(&self, code: &str, user_agent: Option<String>) -> Result<Resolution>;
}
