//! Redirector service library with click tracking.
//!
//! This crate provides a [`RedirectorService`] that resolves short codes to
//! their original URLs and appends a [`ClickEvent`](wormhole_core::ClickEvent)
//! to the matched record on every successful resolution.
//!
//! # Example
//!
//! ```rust
//! use wormhole_redirector::{RandomClickMetadata, RedirectorService, Resolution};
//! use wormhole_storage::InMemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectorService::new(InMemoryStore::new(), RandomClickMetadata::new());
//!
//! match service.record_click("abc123", Some("curl/8.5.0".to_string())).await? {
//!     Resolution::Redirect(url) => println!("Redirect to: {}", url),
//!     Resolution::NotFound => println!("Short URL not found or has expired"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod click;
pub mod error;
pub mod redirector;
pub mod service;

pub use click::{ClickMetadata, ClickMetadataSource, RandomClickMetadata};
pub use error::{RedirectorError, Result};
pub use redirector::{Redirector, Resolution};
pub use service::RedirectorService;
