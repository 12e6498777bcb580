//! Date-window matching between festival intervals and the date filter.

use serde::Serialize;
use tracing::debug;

use crate::dates::{normalize_text, CanonicalDate};
use crate::domain::{Festival, FestivalDate};

/// The date facet of the filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DateFilter {
    #[default]
    Inactive,
    /// A single calendar day.
    Day(String),
    /// An inclusive window; an empty or equal end means a single day.
    #[serde(rename_all = "camelCase")]
    Range { start_date: String, end_date: String },
}

impl DateFilter {
    pub fn day(day: impl Into<String>) -> Self {
        DateFilter::Day(day.into())
    }

    pub fn range(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        DateFilter::Range {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Whether the filter can exclude anything. A window without a start is inactive.
    pub fn is_active(&self) -> bool {
        self.window().is_some()
    }

    /// Start text and, for a multi-day window, end text.
    fn window(&self) -> Option<(&str, Option<&str>)> {
        match self {
            DateFilter::Inactive => None,
            DateFilter::Day(day) if day.trim().is_empty() => None,
            DateFilter::Day(day) => Some((day.as_str(), None)),
            DateFilter::Range { start_date, .. } if start_date.trim().is_empty() => None,
            DateFilter::Range { start_date, end_date } => {
                let end = (!end_date.trim().is_empty() && end_date != start_date).then_some(end_date.as_str());
                Some((start_date.as_str(), end))
            }
        }
    }
}

/// Whether a festival interval overlaps the filter window, compared at whole-day granularity.
///
/// Fails open: an inactive filter, a festival without a start date, and any
/// unparseable date on either side all count as a match.
pub fn intersects(festival_start: Option<&FestivalDate>, festival_end: Option<&FestivalDate>, filter: &DateFilter) -> bool {
    let Some((filter_start, filter_end)) = filter.window() else {
        return true;
    };

    let Some(festival_start) = festival_start else {
        return true;
    };

    let Some(start) = festival_start.valid() else {
        debug!(?festival_start, "Unparseable festival start, keeping record");
        return true;
    };

    let end = match festival_end {
        None => start,
        Some(bound) => match bound.valid() {
            Some(end) => end,
            None => {
                debug!(?bound, "Unparseable festival end, keeping record");
                return true;
            }
        },
    };

    let Some((window_start, window_end)) = resolve_window(filter_start, filter_end) else {
        debug!(filter_start, ?filter_end, "Unparseable filter date, keeping record");
        return true;
    };

    start.start_of_day() <= window_end && end.end_of_day() >= window_start
}

pub fn festival_intersects(festival: &Festival, filter: &DateFilter) -> bool {
    intersects(festival.start_date.as_ref(), festival.end_date.as_ref(), filter)
}

fn resolve_window(start: &str, end: Option<&str>) -> Option<(CanonicalDate, CanonicalDate)> {
    let start = normalize_text(start).ok()?;
    let end = match end {
        Some(end) => normalize_text(end).ok()?,
        None => start,
    };
    Some((start.start_of_day(), end.end_of_day()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bound(y: i32, m: u32, d: u32) -> Option<FestivalDate> {
        Some(FestivalDate::Valid(CanonicalDate::from_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())))
    }

    fn matches(start: &Option<FestivalDate>, end: &Option<FestivalDate>, filter: &DateFilter) -> bool {
        intersects(start.as_ref(), end.as_ref(), filter)
    }

    #[test]
    fn test_inactive_filters_match_everything() {
        let start = bound(2025, 5, 16);
        let end = bound(2025, 5, 17);
        for filter in [DateFilter::Inactive, DateFilter::range("", ""), DateFilter::range("", "2025-01-01"), DateFilter::day("")] {
            assert!(!filter.is_active());
            assert!(matches(&start, &end, &filter));
            assert!(matches(&None, &None, &filter));
        }
    }

    #[test]
    fn test_single_day_inside_interval() {
        let start = bound(2025, 5, 16);
        let end = bound(2025, 5, 18);

        assert!(matches(&start, &end, &DateFilter::day("2025-05-17")));
        assert!(matches(&start, &end, &DateFilter::range("2025-05-18", "2025-05-18")));
        assert!(matches(&start, &end, &DateFilter::range("2025년 5월 16일", "")));
        assert!(!matches(&start, &end, &DateFilter::day("2025-05-19")));
        assert!(!matches(&start, &end, &DateFilter::day("2025-05-15")));
    }

    #[test]
    fn test_range_uses_inclusive_overlap() {
        let start = bound(2025, 5, 16);
        let end = bound(2025, 5, 18);

        // partial overlap on either side
        assert!(matches(&start, &end, &DateFilter::range("2025-05-10", "2025-05-16")));
        assert!(matches(&start, &end, &DateFilter::range("2025-05-18", "2025-05-30")));
        // window inside the festival
        assert!(matches(&start, &end, &DateFilter::range("2025-05-17", "2025-05-17")));
        assert!(!matches(&start, &end, &DateFilter::range("2025-05-19", "2025-05-30")));
    }

    #[test]
    fn test_missing_end_is_single_day_festival() {
        let start = bound(2025, 5, 16);
        assert!(matches(&start, &None, &DateFilter::day("2025-05-16")));
        assert!(!matches(&start, &None, &DateFilter::day("2025-05-17")));
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let evening = Some(FestivalDate::Valid(CanonicalDate::new(
            NaiveDate::from_ymd_opt(2025, 5, 16).unwrap().and_hms_opt(19, 0, 0).unwrap(),
        )));
        assert!(matches(&evening, &evening, &DateFilter::day("2025-05-16")));
        assert!(matches(&evening, &evening, &DateFilter::range("2025-05-14", "2025-05-16")));
    }

    #[test]
    fn test_fails_open_on_unparseable_dates() {
        let start = bound(2025, 5, 16);
        let broken = Some(FestivalDate::Unparseable("TBD".to_string()));

        assert!(matches(&broken, &start, &DateFilter::day("2025-06-01")));
        assert!(matches(&start, &broken, &DateFilter::day("2025-06-01")));
        assert!(matches(&start, &start, &DateFilter::day("next week")));
        assert!(matches(&start, &start, &DateFilter::range("2025-06-01", "someday")));
    }

    #[test]
    fn test_widening_never_removes_matches() {
        let festivals = [
            (bound(2025, 5, 1), bound(2025, 5, 2)),
            (bound(2025, 5, 9), bound(2025, 5, 12)),
            (bound(2025, 5, 15), bound(2025, 5, 15)),
            (bound(2025, 5, 20), bound(2025, 5, 25)),
        ];
        let narrow = DateFilter::range("2025-05-10", "2025-05-15");
        let wide = DateFilter::range("2025-05-05", "2025-05-21");

        for (start, end) in &festivals {
            if matches(start, end, &narrow) {
                assert!(matches(start, end, &wide));
            }
        }
    }
}
