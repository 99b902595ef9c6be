//! URL shortener service implementation.
//!
//! This crate provides request validation and the shortening engine.
//! Core types are re-exported from `wormhole_core`.

pub mod service;
pub mod settings;
pub mod validation;

pub use service::ShortenerService;
pub use settings::ShortenerSettings;
pub use validation::{parse_validity, validate_urls, Field, ValidationError};
pub use wormhole_core::{CreationRequest, Shortener, ShortenerError};
