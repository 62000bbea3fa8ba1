//! Cursor pagination. Cursors are opaque RFC 3339 timestamps of the last
//! item's ordering field; a page is always "items strictly older than the
//! cursor".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ServiceError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 50;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Page {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

pub fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

pub fn parse_cursor(cursor: Option<&str>) -> Result<Option<DateTime<Utc>>, ServiceError> {
    match cursor {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|_| ServiceError::BadRequest(format!("invalid cursor: {raw}"))),
    }
}

pub fn format_cursor(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Truncates an over-fetched (`limit + 1`) list to the page size and derives
/// the next cursor from the last kept item's ordering timestamp.
pub fn paginate<T>(
    mut items: Vec<T>,
    limit: u64,
    timestamp: impl Fn(&T) -> DateTime<Utc>,
) -> (Vec<T>, Option<String>) {
    let limit = limit as usize;
    if items.len() > limit {
        items.truncate(limit);
        let cursor = items.last().map(|item| format_cursor(timestamp(item)));
        (items, cursor)
    } else {
        (items, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_to_the_allowed_range() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(7)), 7);
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_SIZE);
    }

    #[test]
    fn cursors_round_trip_through_rfc3339() {
        let ts = Utc::now();
        let parsed = parse_cursor(Some(&format_cursor(ts))).unwrap().unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn garbage_cursor_is_rejected() {
        assert!(parse_cursor(Some("yesterday")).is_err());
        assert!(parse_cursor(None).unwrap().is_none());
    }

    #[test]
    fn overfetch_yields_a_cursor_exact_fit_does_not() {
        let base = Utc::now();
        let items: Vec<DateTime<Utc>> = (0..4)
            .map(|i| base - chrono::Duration::minutes(i))
            .collect();

        let (page, cursor) = paginate(items.clone(), 3, |ts| *ts);
        assert_eq!(page.len(), 3);
        assert_eq!(cursor, Some(format_cursor(items[2])));

        let (page, cursor) = paginate(items, 4, |ts| *ts);
        assert_eq!(page.len(), 4);
        assert_eq!(cursor, None);
    }
}
