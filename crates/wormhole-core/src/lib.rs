//! Core types and traits for the Wormhole URL shortener.
//!
//! This crate provides the data model, the whole-collection store contract
//! and the clock abstraction shared by the shortener and the redirector.

pub mod clock;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod shortener;
pub mod stats;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ShortenerError, StorageError};
pub use record::{ClickEvent, Location, TrafficSource, UrlRecord, DEFAULT_VALIDITY_MINUTES};
pub use shortcode::ShortCode;
pub use shortener::{CreationRequest, Shortener};
pub use stats::LinkStats;
pub use store::{LoadStatus, Snapshot, UrlStore};
