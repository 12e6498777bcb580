//! Per-day rosters of artists and schools for the calendar view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::constants::{PLACEHOLDER_ARTIST_TIME, PLACEHOLDER_NAME};
use crate::domain::Festival;
use crate::observability::metrics;

/// One artist appearance on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistEvent {
    pub name: String,
    pub festival_id: String,
    pub festival_name: String,
    pub school_name: String,
    pub time: String,
}

/// Unique artists (by name) and unique schools for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub artists: Vec<ArtistEvent>,
    pub schools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Artist,
    School,
}

impl CalendarDay {
    fn add_festival(&mut self, festival: &Festival) {
        let school_name = festival.school_name();
        if !self.schools.iter().any(|school| school == school_name) {
            self.schools.push(school_name.to_string());
        }

        for artist in &festival.artists {
            let name = if artist.name.trim().is_empty() {
                PLACEHOLDER_NAME
            } else {
                artist.name.as_str()
            };

            // Same-named acts on the same day collapse into the first one seen
            if self.artists.iter().any(|existing| existing.name == name) {
                continue;
            }

            self.artists.push(ArtistEvent {
                name: name.to_string(),
                festival_id: festival.id.clone(),
                festival_name: festival.display_name().to_string(),
                school_name: school_name.to_string(),
                time: artist
                    .time
                    .as_deref()
                    .filter(|time| !time.trim().is_empty())
                    .unwrap_or(PLACEHOLDER_ARTIST_TIME)
                    .to_string(),
            });
        }
    }

    /// Marker count shown on the calendar tile.
    pub fn count(&self, view: CalendarView) -> usize {
        match view {
            CalendarView::Artist => self.artists.len(),
            CalendarView::School => self.schools.len(),
        }
    }
}

/// Day key ("YYYY-MM-DD") to roster, ordered by day.
pub type CalendarMap = BTreeMap<String, CalendarDay>;

/// Longest interval, in days after the first, a festival may cover.
pub const MAX_SPAN_DAYS: i64 = 366;

/// First and last calendar day a festival occupies.
///
/// A missing end means a single-day festival. An unparseable bound keeps
/// the festival off the calendar, and an end before the start covers no days.
/// An interval longer than [`MAX_SPAN_DAYS`] collapses to its first day.
pub fn covered_days(festival: &Festival) -> Option<(NaiveDate, NaiveDate)> {
    let start = festival.start_date.as_ref()?.valid()?.day();
    let end = match &festival.end_date {
        None => start,
        Some(bound) => bound.valid()?.day(),
    };

    let span = (end - start).num_days();
    if span > MAX_SPAN_DAYS {
        warn!(
            festival_id = %festival.id,
            %start,
            %end,
            span,
            "Festival interval too long for the calendar, keeping the first day only"
        );
        metrics::calendar::span_clamped();
        return Some((start, start));
    }
    Some((start, end))
}

pub fn covers(festival: &Festival, day: NaiveDate) -> bool {
    covered_days(festival).is_some_and(|(first, last)| first <= day && day <= last)
}

/// Builds the roster for every day any festival occupies.
pub fn aggregate(festivals: &[Festival]) -> CalendarMap {
    let mut events = CalendarMap::new();

    for festival in festivals {
        let Some((first, last)) = covered_days(festival) else {
            debug!(festival_id = %festival.id, "Festival has no usable dates, leaving it off the calendar");
            continue;
        };

        for day in first.iter_days().take_while(|day| *day <= last) {
            events
                .entry(day.format("%Y-%m-%d").to_string())
                .or_default()
                .add_festival(festival);
        }
    }

    metrics::calendar::days_aggregated(events.len());
    events
}

/// Roster for a single day. Festivals not covering `day` are ignored, so the
/// result equals the `aggregate` entry for the same day key.
pub fn aggregate_for_date(festivals: &[Festival], day: NaiveDate) -> CalendarDay {
    let mut roster = CalendarDay::default();
    for festival in festivals.iter().filter(|festival| covers(festival, day)) {
        roster.add_festival(festival);
    }
    roster
}

/// Festivals taking place on `day`, in input order.
pub fn festivals_on(festivals: &[Festival], day: NaiveDate) -> Vec<&Festival> {
    festivals.iter().filter(|festival| covers(festival, day)).collect()
}

/// Non-empty tile counts for the days of one month.
pub fn month_tiles(events: &CalendarMap, year: i32, month: u32, view: CalendarView) -> Vec<(NaiveDate, usize)> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .filter_map(|day| {
            let count = events.get(&day.format("%Y-%m-%d").to_string())?.count(view);
            (count > 0).then_some((day, count))
        })
        .collect()
}
