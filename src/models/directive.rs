//! Directive record and snapshot structures.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

/// A directive entry scraped from the listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectiveRecord {
    /// Fingerprint of the canonical URL
    pub id: String,

    /// Display text of the listing link
    pub title: String,

    /// Canonical absolute link
    pub url: String,

    /// Publication time, when known
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub published: Option<DateTime<Utc>>,
}

impl DirectiveRecord {
    /// Build a record, deriving its id from the URL.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        published: Option<DateTime<Utc>>,
    ) -> Self {
        let url = url.into();
        Self {
            id: Self::fingerprint(&url),
            title: title.into(),
            url,
            published,
        }
    }

    /// Lowercase hex SHA-256 of the canonical URL.
    pub fn fingerprint(url: &str) -> String {
        hex::encode(Sha256::digest(url.as_bytes()))
    }
}

/// Parse a publication timestamp from RFC 3339 or a bare `YYYY-MM-DD` date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// An unreadable timestamp should not invalidate the whole snapshot.
fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// The listing as persisted after the last publish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<DirectiveRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<DirectiveRecord>) -> Self {
        Self { records }
    }

    /// Set of ids present in the snapshot.
    pub fn ids(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn records(&self) -> &[DirectiveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = DirectiveRecord::new("Old", "https://www.cisa.gov/directive/bod-22-01", None);
        let b = DirectiveRecord::new("New", "https://www.cisa.gov/directive/bod-22-01", None);
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_per_url() {
        assert_ne!(
            DirectiveRecord::fingerprint("https://www.cisa.gov/directive/a"),
            DirectiveRecord::fingerprint("https://www.cisa.gov/directive/b")
        );
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00Z"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp(" 2024-05-01 "),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("May 1st"), None);
    }

    #[test]
    fn test_snapshot_json_layout() {
        let snapshot = Snapshot::new(vec![DirectiveRecord {
            id: "a".to_string(),
            title: "X".to_string(),
            url: "u1".to_string(),
            published: None,
        }]);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"[{"id":"a","title":"X","url":"u1"}]"#);
    }

    #[test]
    fn test_snapshot_tolerates_bad_published() {
        let json = r#"[{"id":"a","title":"X","url":"u1","published":"yesterday"}]"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].published, None);
    }

    #[test]
    fn test_snapshot_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Snapshot>(r#"{"id":"a"}"#).is_err());
        assert!(serde_json::from_str::<Snapshot>(r#"[{"title":"X"}]"#).is_err());
    }
}
