use serde::Serialize;
use std::fmt::Display;
use std::num::IntErrorKind;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;
use wormhole_core::{CreationRequest, ShortCode};

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "Invalid URL format";
pub const VALIDITY_NOT_POSITIVE: &str = "Validity must be a positive integer";
pub const SHORTCODE_INVALID: &str = "Shortcode must be alphanumeric and 1-20 characters";
pub const VALIDITY_TOO_LARGE: &str = "Validity must be at most 525600000 minutes";

/// Longest accepted validity window, one thousand years.
pub const MAX_VALIDITY_MINUTES: i64 = 1_000 * 365 * 24 * 60;

/// Which input of a request row an error refers to.
///
/// Variants are ordered the way a row's inputs are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Url,
    Validity,
    Shortcode,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::Validity => "validity",
            Field::Shortcode => "shortcode",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-correctable problem with one request row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}-{index}: {message}")]
pub struct ValidationError {
    pub kind: Field,
    /// Position of the row in the batch.
    pub index: usize,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: Field, index: usize, message: &str) -> Self {
        Self {
            kind,
            index,
            message: message.to_string(),
        }
    }

    /// The `{kind}-{index}` key, e.g. `url-0`.
    pub fn field(&self) -> String {
        format!("{}-{}", self.kind, self.index)
    }
}

/// Returns whether `url` parses as an absolute URL.
pub fn validate_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Returns whether `code` is usable as a custom short code.
pub fn validate_shortcode(code: &str) -> bool {
    ShortCode::new(code).is_ok()
}

/// Parses a validity typed by the user for row `index`.
///
/// Anything that is not a whole number is rejected the same way a
/// non-positive one is.
pub fn parse_validity(index: usize, raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse::<i64>().map_err(|e| {
        let message = match e.kind() {
            IntErrorKind::PosOverflow => VALIDITY_TOO_LARGE,
            _ => VALIDITY_NOT_POSITIVE,
        };
        ValidationError::new(Field::Validity, index, message)
    })
}

/// Checks every request and collects all problems found.
///
/// Checks are independent: a row with a bad URL and a bad short code gets
/// two errors.
pub fn validate_urls(requests: &[CreationRequest]) -> Vec<ValidationError> {
    info!(url_count = requests.len(), "starting url validation");

    let mut errors = Vec::new();
    for (index, request) in requests.iter().enumerate() {
        if request.original_url.is_empty() {
            errors.push(ValidationError::new(Field::Url, index, URL_REQUIRED));
        } else if !validate_url(&request.original_url) {
            errors.push(ValidationError::new(Field::Url, index, URL_INVALID));
        }

        if let Some(minutes) = request.validity_minutes {
            if minutes <= 0 {
                errors.push(ValidationError::new(
                    Field::Validity,
                    index,
                    VALIDITY_NOT_POSITIVE,
                ));
            } else if minutes > MAX_VALIDITY_MINUTES {
                errors.push(ValidationError::new(
                    Field::Validity,
                    index,
                    VALIDITY_TOO_LARGE,
                ));
            }
        }

        if let Some(code) = request.custom_shortcode() {
            if !validate_shortcode(code) {
                errors.push(ValidationError::new(Field::Shortcode, index, SHORTCODE_INVALID));
            }
        }
    }

    for error in &errors {
        debug!(field = %error.field(), message = %error.message, "validation error");
    }
    info!(error_count = errors.len(), "url validation completed");
    errors
}
