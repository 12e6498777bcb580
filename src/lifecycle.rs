//! Festival lifecycle status and countdown, evaluated against an explicit `now`.

use serde::Serialize;

use crate::constants::{countdown_label, LABEL_ENDED, LABEL_ONGOING, LABEL_UNKNOWN};
use crate::dates::{ceil_days_between, CanonicalDate};
use crate::domain::{Festival, FestivalDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FestivalStatus {
    Upcoming,
    Ongoing,
    Ended,
    Unknown,
}

/// Derived status attached to a festival for one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    pub status: FestivalStatus,
    pub status_label: String,
    pub days_remaining: Option<i64>,
}

impl Lifecycle {
    fn unknown() -> Self {
        Self {
            status: FestivalStatus::Unknown,
            status_label: LABEL_UNKNOWN.to_string(),
            days_remaining: None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.status == FestivalStatus::Ended
    }
}

/// Classifies a festival interval relative to `now`.
///
/// A bound that is missing or unparseable yields `Unknown`. Both bounds are
/// compared as stored, so an end recorded at midnight has passed once that
/// day is under way. An end before the start is not repaired: such a
/// festival goes straight from upcoming to ended.
pub fn classify(start: Option<&FestivalDate>, end: Option<&FestivalDate>, now: CanonicalDate) -> Lifecycle {
    let (Some(start), Some(end)) = (start.and_then(FestivalDate::valid), end.and_then(FestivalDate::valid)) else {
        return Lifecycle::unknown();
    };

    if now < start {
        let days = ceil_days_between(now.start_of_day(), start);
        Lifecycle {
            status: FestivalStatus::Upcoming,
            status_label: countdown_label(days),
            days_remaining: Some(days),
        }
    } else if now <= end {
        Lifecycle {
            status: FestivalStatus::Ongoing,
            status_label: LABEL_ONGOING.to_string(),
            days_remaining: None,
        }
    } else {
        Lifecycle {
            status: FestivalStatus::Ended,
            status_label: LABEL_ENDED.to_string(),
            days_remaining: None,
        }
    }
}

pub fn classify_festival(festival: &Festival, now: CanonicalDate) -> Lifecycle {
    classify(festival.start_date.as_ref(), festival.end_date.as_ref(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> CanonicalDate {
        CanonicalDate::from_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> CanonicalDate {
        CanonicalDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap())
    }

    fn bound(date: CanonicalDate) -> Option<FestivalDate> {
        Some(FestivalDate::Valid(date))
    }

    #[test]
    fn test_upcoming_counts_whole_days_from_midnight() {
        let start = bound(date(2025, 5, 16));
        let end = bound(date(2025, 5, 17));

        let lifecycle = classify(start.as_ref(), end.as_ref(), at(2025, 5, 10, 21));
        assert_eq!(lifecycle.status, FestivalStatus::Upcoming);
        assert_eq!(lifecycle.days_remaining, Some(6));
        assert_eq!(lifecycle.status_label, "D-6");

        let eve = classify(start.as_ref(), end.as_ref(), at(2025, 5, 15, 23));
        assert_eq!(eve.days_remaining, Some(1));
    }

    #[test]
    fn test_ongoing_up_to_the_stored_end() {
        let start = bound(date(2025, 5, 16));
        let end = bound(date(2025, 5, 17));

        for now in [date(2025, 5, 16), at(2025, 5, 16, 20), date(2025, 5, 17)] {
            let lifecycle = classify(start.as_ref(), end.as_ref(), now);
            assert_eq!(lifecycle.status, FestivalStatus::Ongoing, "{now}");
            assert_eq!(lifecycle.days_remaining, None);
            assert_eq!(lifecycle.status_label, "진행중");
        }

        let evening = classify(start.as_ref(), end.as_ref(), at(2025, 5, 17, 23));
        assert_eq!(evening.status, FestivalStatus::Ended);
    }

    #[test]
    fn test_midnight_end_has_passed_later_that_day() {
        let single_day = bound(date(2025, 5, 16));

        let afternoon = classify(single_day.as_ref(), single_day.as_ref(), at(2025, 5, 16, 15));
        assert_eq!(afternoon.status, FestivalStatus::Ended);
        assert_eq!(afternoon.status_label, "종료");

        let at_midnight = classify(single_day.as_ref(), single_day.as_ref(), date(2025, 5, 16));
        assert_eq!(at_midnight.status, FestivalStatus::Ongoing);

        let with_time = bound(at(2025, 5, 16, 23));
        let evening = classify(single_day.as_ref(), with_time.as_ref(), at(2025, 5, 16, 15));
        assert_eq!(evening.status, FestivalStatus::Ongoing);
    }

    #[test]
    fn test_ended_after_last_day() {
        let start = bound(date(2025, 5, 16));
        let end = bound(date(2025, 5, 17));

        let lifecycle = classify(start.as_ref(), end.as_ref(), date(2025, 5, 18));
        assert_eq!(lifecycle.status, FestivalStatus::Ended);
        assert_eq!(lifecycle.status_label, "종료");
        assert!(lifecycle.is_ended());
    }

    #[test]
    fn test_missing_or_unparseable_bounds_are_unknown() {
        let now = date(2025, 5, 16);
        let valid = bound(date(2025, 5, 16));
        let broken = Some(FestivalDate::Unparseable("미정".to_string()));

        for (start, end) in [(None, valid.clone()), (valid.clone(), None), (broken.clone(), valid.clone()), (valid, broken)] {
            let lifecycle = classify(start.as_ref(), end.as_ref(), now);
            assert_eq!(lifecycle.status, FestivalStatus::Unknown);
            assert_eq!(lifecycle.days_remaining, None);
            assert_eq!(lifecycle.status_label, "정보 없음");
        }
    }

    #[test]
    fn test_status_flips_exactly_once_at_each_bound() {
        let start = bound(date(2025, 5, 16));
        let end = bound(date(2025, 5, 18));

        let mut now = date(2025, 5, 13);
        let mut statuses = Vec::new();
        while now < date(2025, 5, 22) {
            let status = classify(start.as_ref(), end.as_ref(), now).status;
            if statuses.last() != Some(&status) {
                statuses.push(status);
            }
            now = CanonicalDate::new(now.naive() + Duration::hours(1));
        }

        assert_eq!(
            statuses,
            vec![FestivalStatus::Upcoming, FestivalStatus::Ongoing, FestivalStatus::Ended]
        );
    }

    #[test]
    fn test_end_before_start_is_never_ongoing() {
        // malformed source data passes through unrepaired
        let start = bound(date(2025, 5, 20));
        let end = bound(date(2025, 5, 10));

        let before = classify(start.as_ref(), end.as_ref(), date(2025, 5, 15));
        assert_eq!(before.status, FestivalStatus::Upcoming);
        assert_eq!(before.days_remaining, Some(5));

        let on_start = classify(start.as_ref(), end.as_ref(), date(2025, 5, 20));
        assert_eq!(on_start.status, FestivalStatus::Ended);
    }
}
