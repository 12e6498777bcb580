//! Korean display strings for dates and performance times.

use chrono::{Datelike, Timelike, Weekday};

use super::{normalize, CanonicalDate, RawDateValue};

pub const NO_DATE_LABEL: &str = "날짜 정보 없음";
pub const INVALID_DATE_LABEL: &str = "날짜 정보 오류";

/// "2025년 05월 16일"
pub fn format_date(date: &CanonicalDate) -> String {
    let day = date.day();
    format!("{:04}년 {:02}월 {:02}일", day.year(), day.month(), day.day())
}

/// Formats a raw value, falling back to the original text when it cannot be parsed.
pub fn format_raw_date(raw: Option<&RawDateValue>) -> String {
    let Some(raw) = raw else {
        return NO_DATE_LABEL.to_string();
    };

    match normalize(raw) {
        Ok(date) => format_date(&date),
        Err(_) => match raw {
            RawDateValue::IsoString(text) | RawDateValue::LocalizedString(text) => text.clone(),
            _ => INVALID_DATE_LABEL.to_string(),
        },
    }
}

/// "18:30" -> "오후 6시 30분"
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }

    let mut parts = time.split(':');
    let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hours, minutes) {
        (Some(hours), Some(minutes)) if hours < 24 && minutes < 60 => {
            format!("{} {}시 {}분", meridiem(hours), twelve_hour(hours), minutes)
        }
        _ => time.to_string(),
    }
}

/// "2025년 05월 16일 금요일 오후 6시 30분"
pub fn format_date_time(date: &CanonicalDate) -> String {
    let value = date.naive();
    format!(
        "{} {} {} {}시 {:02}분",
        format_date(date),
        weekday_name(value.weekday()),
        meridiem(value.hour()),
        twelve_hour(value.hour()),
        value.minute()
    )
}

fn meridiem(hours: u32) -> &'static str {
    if hours >= 12 {
        "오후"
    } else {
        "오전"
    }
}

fn twelve_hour(hours: u32) -> u32 {
    match hours % 12 {
        0 => 12,
        h => h,
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}
