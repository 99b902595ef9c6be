use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Validity window applied when a request does not carry a usable one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// A shortened URL together with its click history.
///
/// Everything except `clicks` is fixed at creation. `expired` is a derived
/// flag: it is persisted, but recomputed from `expires_at` on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// Creation time in unix milliseconds joined with the batch index.
    pub id: String,
    /// The original URL that was shortened.
    pub original_url: String,
    pub short_code: ShortCode,
    /// `short_code` embedded in the configured base URL.
    pub short_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub validity_minutes: i64,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>,
    #[serde(rename = "isExpired", default)]
    pub expired: bool,
}

impl UrlRecord {
    /// Returns whether the record is expired at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Recomputes the derived `expired` flag against `now`.
    pub fn refresh_expiry(&mut self, now: Timestamp) {
        self.expired = self.is_expired_at(now);
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    pub fn clicks_by_source(&self) -> BTreeMap<TrafficSource, usize> {
        let mut counts = BTreeMap::new();
        for click in &self.clicks {
            *counts.entry(click.source).or_insert(0) += 1;
        }
        counts
    }

    pub fn clicks_by_location(&self) -> BTreeMap<Location, usize> {
        let mut counts = BTreeMap::new();
        for click in &self.clicks {
            *counts.entry(click.location).or_insert(0) += 1;
        }
        counts
    }
}

/// One successful resolution of a short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    /// Click time in unix milliseconds joined with a random suffix.
    pub id: String,
    pub timestamp: Timestamp,
    pub source: TrafficSource,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Where a click claims to come from. Values are simulated, not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrafficSource {
    Direct,
    Google,
    Facebook,
    Twitter,
    Email,
    Other,
}

impl TrafficSource {
    pub const ALL: [TrafficSource; 6] = [
        TrafficSource::Direct,
        TrafficSource::Google,
        TrafficSource::Facebook,
        TrafficSource::Twitter,
        TrafficSource::Email,
        TrafficSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficSource::Direct => "Direct",
            TrafficSource::Google => "Google",
            TrafficSource::Facebook => "Facebook",
            TrafficSource::Twitter => "Twitter",
            TrafficSource::Email => "Email",
            TrafficSource::Other => "Other",
        }
    }
}

impl Display for TrafficSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse, simulated click location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "New York, US")]
    NewYork,
    #[serde(rename = "London, UK")]
    London,
    #[serde(rename = "Mumbai, IN")]
    Mumbai,
    #[serde(rename = "Tokyo, JP")]
    Tokyo,
    #[serde(rename = "Sydney, AU")]
    Sydney,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::NewYork,
        Location::London,
        Location::Mumbai,
        Location::Tokyo,
        Location::Sydney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::NewYork => "New York, US",
            Location::London => "London, UK",
            Location::Mumbai => "Mumbai, IN",
            Location::Tokyo => "Tokyo, JP",
            Location::Sydney => "Sydney, AU",
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn record(created_at: Timestamp, validity_minutes: i64) -> UrlRecord {
        UrlRecord {
            id: format!("{}-0", created_at.as_millisecond()),
            original_url: "https://example.com/a?b=c".to_string(),
            short_code: ShortCode::new_unchecked("abc123"),
            short_url: "https://worm.hole/abc123".to_string(),
            created_at,
            expires_at: created_at + SignedDuration::from_mins(validity_minutes),
            validity_minutes,
            clicks: Vec::new(),
            expired: false,
        }
    }

    fn click(source: TrafficSource, location: Location) -> ClickEvent {
        ClickEvent {
            id: "1-1".to_string(),
            timestamp: Timestamp::from_second(60).unwrap(),
            source,
            location,
            user_agent: None,
        }
    }

    #[test]
    fn expiry_is_strictly_after_expires_at() {
        let created = Timestamp::from_second(0).unwrap();
        let mut rec = record(created, 30);

        rec.refresh_expiry(created + SignedDuration::from_mins(30));
        assert!(!rec.expired);

        rec.refresh_expiry(
            created + SignedDuration::from_mins(30) + SignedDuration::from_millis(1),
        );
        assert!(rec.expired);
    }

    #[test]
    fn persisted_layout_uses_camel_case_and_iso_timestamps() {
        let created = Timestamp::from_second(1_700_000_000).unwrap();
        let mut rec = record(created, 30);
        rec.clicks.push(click(TrafficSource::Google, Location::Tokyo));

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["originalUrl"], "https://example.com/a?b=c");
        assert_eq!(value["shortCode"], "abc123");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
        assert_eq!(value["expiresAt"], "2023-11-14T22:43:20Z");
        assert_eq!(value["validityMinutes"], 30);
        assert_eq!(value["isExpired"], false);
        assert_eq!(value["clicks"][0]["source"], "Google");
        assert_eq!(value["clicks"][0]["location"], "Tokyo, JP");
        assert!(value["clicks"][0].get("userAgent").is_none());
    }

    #[test]
    fn missing_clicks_default_to_empty() {
        let json = r#"{
            "id": "1-0",
            "originalUrl": "https://example.com",
            "shortCode": "abc",
            "shortUrl": "https://worm.hole/abc",
            "createdAt": "2024-01-01T00:00:00Z",
            "expiresAt": "2024-01-01T00:30:00Z",
            "validityMinutes": 30
        }"#;
        let rec: UrlRecord = serde_json::from_str(json).unwrap();
        assert!(rec.clicks.is_empty());
        assert!(!rec.expired);
    }

    #[test]
    fn click_breakdowns() {
        let mut rec = record(Timestamp::from_second(0).unwrap(), 30);
        rec.clicks.push(click(TrafficSource::Email, Location::London));
        rec.clicks.push(click(TrafficSource::Direct, Location::London));
        rec.clicks.push(click(TrafficSource::Email, Location::Sydney));

        let by_source: Vec<_> = rec.clicks_by_source().into_iter().collect();
        assert_eq!(
            by_source,
            vec![(TrafficSource::Direct, 1), (TrafficSource::Email, 2)]
        );

        let by_location = rec.clicks_by_location();
        assert_eq!(by_location[&Location::London], 2);
        assert_eq!(by_location[&Location::Sydney], 1);
        assert_eq!(rec.click_count(), 3);
    }

    #[test]
    fn category_names_match_serialized_form() {
        for source in TrafficSource::ALL {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source));
        }
        for location in Location::ALL {
            let json = serde_json::to_string(&location).unwrap();
            assert_eq!(json, format!("\"{}\"", location));
        }
    }
}
