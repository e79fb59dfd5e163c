//! Client filters.
//!
//! A filter is an immutable value. The orchestrator swaps in a new one
//! and recomputes; nothing here holds state between calls.

use crate::{
    error::{BoardError, BoardResult},
    types::{Client, Region, Segment, Timestamp},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The select value meaning "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientFilter {
    /// Keep clients registered within the last N days (inclusive cutoff).
    pub registered_within_days: Option<u32>,
    pub segment: Option<Segment>,
    pub region: Option<Region>,
}

impl ClientFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        *self == Self::default()
    }

    /// Build a filter from the dashboard's select values. `"all"` in any
    /// case means the predicate is absent.
    pub fn parse(date_range: &str, segment: &str, region: &str) -> BoardResult<Self> {
        let registered_within_days = if is_all(date_range) {
            None
        } else {
            match date_range.trim().parse::<u32>() {
                Ok(days) if days > 0 => Some(days),
                _ => {
                    return Err(BoardError::InvalidFilter {
                        field: "date range",
                        value: date_range.to_string(),
                    })
                }
            }
        };

        let segment = if is_all(segment) {
            None
        } else {
            Some(segment.parse().map_err(|_| BoardError::InvalidFilter {
                field: "segment",
                value: segment.to_string(),
            })?)
        };

        let region = if is_all(region) {
            None
        } else {
            Some(region.parse().map_err(|_| BoardError::InvalidFilter {
                field: "region",
                value: region.to_string(),
            })?)
        };

        Ok(Self {
            registered_within_days,
            segment,
            region,
        })
    }

    pub fn matches(&self, client: &Client, now: Timestamp) -> bool {
        if let Some(days) = self.registered_within_days {
            // A window reaching past the earliest representable instant
            // has no cutoff.
            if let Some(cutoff) = now.checked_sub_signed(Duration::days(days as i64)) {
                if client.registration_date < cutoff {
                    return false;
                }
            }
        }
        if let Some(segment) = self.segment {
            if client.segment != segment {
                return false;
            }
        }
        if let Some(region) = self.region {
            if client.region != region {
                return false;
            }
        }
        true
    }
}

fn is_all(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(ALL)
}

/// Stable filter: survivors keep their input order.
pub fn apply_filters(clients: &[Client], filter: &ClientFilter, now: Timestamp) -> Vec<Client> {
    clients
        .iter()
        .filter(|c| filter.matches(c, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_day_count_keeps_everyone() {
        let now = chrono::Utc::now();
        let old = Client::new(
            "CLI000001",
            Segment::Basic,
            Region::Sul,
            crate::types::ClientStatus::Active,
            now - Duration::days(365 * 200),
        );
        let f = ClientFilter::parse(&u32::MAX.to_string(), "all", "all").unwrap();
        assert!(f.matches(&old, now));
    }

    #[test]
    fn parse_all_is_empty_filter() {
        let f = ClientFilter::parse("all", "ALL", "All").unwrap();
        assert!(f.is_all());
    }

    #[test]
    fn parse_select_values() {
        let f = ClientFilter::parse("30", "premium", "centro-oeste").unwrap();
        assert_eq!(f.registered_within_days, Some(30));
        assert_eq!(f.segment, Some(Segment::Premium));
        assert_eq!(f.region, Some(Region::CentroOeste));
    }

    #[test]
    fn parse_rejects_junk() {
        assert!(matches!(
            ClientFilter::parse("soon", "all", "all"),
            Err(BoardError::InvalidFilter { field: "date range", .. })
        ));
        assert!(matches!(
            ClientFilter::parse("0", "all", "all"),
            Err(BoardError::InvalidFilter { field: "date range", .. })
        ));
        assert!(matches!(
            ClientFilter::parse("all", "gold", "all"),
            Err(BoardError::InvalidFilter { field: "segment", .. })
        ));
        assert!(matches!(
            ClientFilter::parse("all", "all", "leste"),
            Err(BoardError::InvalidFilter { field: "region", .. })
        ));
    }
}
