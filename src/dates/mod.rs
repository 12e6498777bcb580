//! Canonical dates and the normalizer that produces them.
//!
//! Festival documents carry dates in several encodings: ISO strings, Korean
//! calendar strings ("2025년 5월 16일"), already-materialized date-times and
//! lazy timestamp handles from the document store. The loader wraps each one
//! in a [`RawDateValue`] and [`normalize`] turns it into a [`CanonicalDate`].
//! Everything downstream compares canonical dates only.

pub mod format;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::{FestivalError, Result};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

static LOCALIZED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일").expect("valid localized date pattern")
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?$")
        .expect("valid iso date pattern")
});

/// A local wall-clock instant. Day-level comparisons go through
/// [`CanonicalDate::start_of_day`] and [`CanonicalDate::end_of_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalDate(NaiveDateTime);

impl CanonicalDate {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Midnight at the start of `day`.
    pub fn from_day(day: NaiveDate) -> Self {
        Self(day.and_time(NaiveTime::MIN))
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn day(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn start_of_day(&self) -> Self {
        Self::from_day(self.day())
    }

    /// 23:59:59.999 on the same day.
    pub fn end_of_day(&self) -> Self {
        Self(self.start_of_day().0 + Duration::milliseconds(DAY_MS - 1))
    }

    pub fn day_key(&self) -> String {
        iso_day_key(self)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// A timestamp handle that is only turned into a date-time on demand.
pub trait DeferredTimestamp: fmt::Debug + Send + Sync {
    /// Materializes the local wall-clock value, or `None` when out of range.
    fn materialize(&self) -> Option<NaiveDateTime>;
}

/// Seconds/nanoseconds timestamp as stored by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanos: u32,
    pub offset: FixedOffset,
}

impl StoreTimestamp {
    pub fn new(seconds: i64, nanos: u32, offset: FixedOffset) -> Self {
        Self { seconds, nanos, offset }
    }
}

impl DeferredTimestamp for StoreTimestamp {
    fn materialize(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(self.seconds, self.nanos)
            .map(|utc| utc.with_timezone(&self.offset).naive_local())
    }
}

/// The date encodings accepted at the loader boundary.
#[derive(Debug, Clone)]
pub enum RawDateValue {
    IsoString(String),
    LocalizedString(String),
    NativeDate(NaiveDateTime),
    DeferredTimestamp(Arc<dyn DeferredTimestamp>),
}

impl RawDateValue {
    /// Classifies free text by the Korean year marker.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains('년') {
            RawDateValue::LocalizedString(text)
        } else {
            RawDateValue::IsoString(text)
        }
    }

    pub fn deferred(timestamp: impl DeferredTimestamp + 'static) -> Self {
        RawDateValue::DeferredTimestamp(Arc::new(timestamp))
    }

    /// Epoch milliseconds rendered as wall-clock time at `offset`.
    pub fn from_epoch_millis(millis: i64, offset: FixedOffset) -> Option<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|utc| RawDateValue::NativeDate(utc.with_timezone(&offset).naive_local()))
    }

    /// Text form used in diagnostics and in unparseable-date fallbacks.
    pub fn describe(&self) -> String {
        match self {
            RawDateValue::IsoString(s) | RawDateValue::LocalizedString(s) => s.clone(),
            RawDateValue::NativeDate(dt) => dt.to_string(),
            RawDateValue::DeferredTimestamp(ts) => format!("{:?}", ts),
        }
    }
}

/// Converts any accepted encoding into a canonical date.
pub fn normalize(raw: &RawDateValue) -> Result<CanonicalDate> {
    match raw {
        RawDateValue::DeferredTimestamp(handle) => handle
            .materialize()
            .map(CanonicalDate)
            .ok_or_else(|| FestivalError::UnparseableDate { raw: raw.describe() }),
        RawDateValue::NativeDate(value) => Ok(CanonicalDate(*value)),
        RawDateValue::IsoString(text) | RawDateValue::LocalizedString(text) => normalize_text(text),
    }
}

/// Parses a date string, trying the localized pattern before ISO.
pub fn normalize_text(text: &str) -> Result<CanonicalDate> {
    let trimmed = text.trim();
    let unparseable = || FestivalError::UnparseableDate { raw: text.to_string() };

    if let Some(caps) = LOCALIZED_DATE.captures(trimmed) {
        let iso = format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]);
        return NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
            .map(CanonicalDate::from_day)
            .map_err(|_| unparseable());
    }

    if let Some(caps) = ISO_DATE.captures(trimmed) {
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = caps[1].parse::<i32>().map_err(|_| unparseable())?;
        let day = NaiveDate::from_ymd_opt(year, field(2).unwrap_or(0), field(3).unwrap_or(0))
            .ok_or_else(unparseable)?;

        if caps.get(4).is_none() {
            return Ok(CanonicalDate::from_day(day));
        }

        let nanos = caps
            .get(7)
            .and_then(|m| format!("{:0<9}", m.as_str()).parse::<u32>().ok())
            .unwrap_or(0);
        let time = NaiveTime::from_hms_nano_opt(
            field(4).unwrap_or(0),
            field(5).unwrap_or(0),
            field(6).unwrap_or(0),
            nanos,
        )
        .ok_or_else(unparseable)?;
        return Ok(CanonicalDate(day.and_time(time)));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| CanonicalDate(dt.naive_local()))
        .map_err(|_| unparseable())
}

/// "YYYY-MM-DD" key for grouping by calendar day.
pub fn iso_day_key(date: &CanonicalDate) -> String {
    date.start_of_day().0.format("%Y-%m-%d").to_string()
}

/// Whole days from `from` to `to`, rounded up.
pub(crate) fn ceil_days_between(from: CanonicalDate, to: CanonicalDate) -> i64 {
    let diff = (to.0 - from.0).num_milliseconds();
    let whole = diff / DAY_MS;
    if diff % DAY_MS > 0 {
        whole + 1
    } else {
        whole
    }
}
