use crate::record::UrlRecord;
use serde::Serialize;

/// Summary counts over a set of records.
///
/// Active and expired counts follow each record's `expired` flag, so the
/// records should have been refreshed against the current time first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_clicks: usize,
}

impl LinkStats {
    pub fn from_records(records: &[UrlRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            if record.expired {
                stats.expired += 1;
            } else {
                stats.active += 1;
            }
            stats.total_clicks += record.click_count();
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ClickEvent, Location, TrafficSource};
    use crate::ShortCode;
    use jiff::{SignedDuration, Timestamp};

    fn record(code: &str, expired: bool, clicks: usize) -> UrlRecord {
        let created_at = Timestamp::from_second(0).unwrap();
        UrlRecord {
            id: format!("0-{code}"),
            original_url: "https://example.com".to_string(),
            short_code: ShortCode::new_unchecked(code),
            short_url: format!("https://worm.hole/{code}"),
            created_at,
            expires_at: created_at + SignedDuration::from_mins(30),
            validity_minutes: 30,
            clicks: (0..clicks)
                .map(|i| ClickEvent {
                    id: format!("0-{i}"),
                    timestamp: created_at,
                    source: TrafficSource::Direct,
                    location: Location::Mumbai,
                    user_agent: None,
                })
                .collect(),
            expired,
        }
    }

    #[test]
    fn empty_collection() {
        assert_eq!(LinkStats::from_records(&[]), LinkStats::default());
    }

    #[test]
    fn counts_active_expired_and_clicks() {
        let records = vec![
            record("a", false, 2),
            record("b", true, 5),
            record("c", false, 0),
        ];
        let stats = LinkStats::from_records(&records);
        assert_eq!(
            stats,
            LinkStats {
                total: 3,
                active: 2,
                expired: 1,
                total_clicks: 7,
            }
        );
    }
}
