use campus_fest::dates::{normalize, RawDateValue};
use campus_fest::filter::{apply, matches_artist, matches_school, FilterPatch, FilterState};
use campus_fest::{CanonicalDate, DateFilter, Festival, FestivalArtist, FestivalDate, FestivalStatus};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> CanonicalDate {
    CanonicalDate::from_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn text_date(text: &str) -> Option<FestivalDate> {
    Some(FestivalDate::from_raw(&RawDateValue::from_text(text)))
}

fn festival(id: &str, school: &str, start: &str, end: &str) -> Festival {
    Festival::new(id, format!("{school} 축제"))
        .with_university_name(school)
        .with_dates(text_date(start), text_date(end))
}

fn ids(festivals: &[Festival], filters: &FilterState, now: CanonicalDate) -> Vec<String> {
    apply(festivals, filters, now)
        .iter()
        .map(|listed| listed.festival.id.clone())
        .collect()
}

fn date_filter(start: &str, end: &str) -> FilterState {
    FilterState {
        date: DateFilter::range(start, end),
        ..FilterState::default()
    }
}

#[test]
fn test_single_day_festival_scenario() {
    let festivals = vec![festival("A", "Band Univ", "2025-05-16", "2025-05-16").with_artist(FestivalArtist::new("BAND X"))];
    let now = day(2025, 5, 1);

    assert_eq!(ids(&festivals, &date_filter("2025-05-16", "2025-05-16"), now), vec!["A"]);
    assert!(ids(&festivals, &date_filter("2025-05-17", "2025-05-18"), now).is_empty());
}

#[test]
fn test_localized_and_iso_strings_share_a_day_key() {
    let localized = normalize(&RawDateValue::from_text("2025년 5월 16일")).unwrap();
    let iso = normalize(&RawDateValue::from_text("2025-05-16")).unwrap();
    assert_eq!(localized.day_key(), iso.day_key());
}

#[test]
fn test_festival_without_start_is_never_excluded_by_date() {
    let undated = Festival::new("undated", "날짜 미정 축제").with_dates(None, text_date("2025-05-16"));
    let festivals = vec![undated];
    let now = day(2025, 5, 1);

    for filters in [
        date_filter("2025-05-16", ""),
        date_filter("1999-01-01", "1999-01-02"),
        date_filter("garbage", "2025-05-16"),
        FilterState {
            date: DateFilter::day("2030-12-31"),
            ..FilterState::default()
        },
    ] {
        assert_eq!(ids(&festivals, &filters, now), vec!["undated"], "{filters:?}");
    }
}

#[test]
fn test_empty_filter_state_is_identity_for_active_collections() {
    let festivals = vec![
        festival("c", "C대학교", "2025-06-01", "2025-06-02"),
        festival("a", "A대학교", "2025-05-16", "2025-05-18"),
        Festival::new("x", "날짜 없음"),
        festival("b", "B대학교", "2025-05-20", "2025-05-20"),
    ];
    let listed = apply(&festivals, &FilterState::default(), day(2025, 5, 17));

    let returned: Vec<&Festival> = listed.iter().map(|l| l.festival).collect();
    let expected: Vec<&Festival> = festivals.iter().collect();
    assert_eq!(returned, expected);
}

#[test]
fn test_artist_then_school_order_is_pinned() {
    let festivals = vec![
        festival("1", "Seoul National University", "2025-05-16", "2025-05-16").with_artist(FestivalArtist::new("Rain")),
        festival("2", "Seoul Arts College", "2025-05-17", "2025-05-17").with_artist(FestivalArtist::new("IU")),
        festival("3", "Busan University", "2025-05-18", "2025-05-18").with_artist(FestivalArtist::new("Rain")),
        festival("4", "Seoul Women's University", "2025-05-19", "2025-05-19")
            .with_artist(FestivalArtist::new("rainbow")),
    ];
    let now = day(2025, 5, 1);

    let combined = FilterState {
        artist: "Rain".to_string(),
        school: "Seoul".to_string(),
        ..FilterState::default()
    };

    let artist_first: Vec<&Festival> = festivals.iter().filter(|f| matches_artist(f, "Rain")).collect();
    let then_school: Vec<String> = artist_first
        .into_iter()
        .filter(|f| matches_school(f, "Seoul"))
        .map(|f| f.id.clone())
        .collect();

    assert_eq!(ids(&festivals, &combined, now), then_school);
    assert_eq!(then_school, vec!["1", "4"]);
}

#[test]
fn test_facets_combine_conjunctively() {
    let festivals = vec![
        festival("a", "연세대학교", "2025-05-16", "2025-05-17")
            .with_region("서울 서대문구")
            .with_artist(FestivalArtist::new("IU")),
        festival("b", "연세대학교 미래캠퍼스", "2025-05-16", "2025-05-17")
            .with_region("강원 원주")
            .with_artist(FestivalArtist::new("IU")),
        festival("c", "연세대학교", "2025-06-16", "2025-06-17")
            .with_region("서울 서대문구")
            .with_artist(FestivalArtist::new("IU")),
    ];

    let mut filters = FilterState::default();
    filters.update(
        FilterPatch::new()
            .school("연세")
            .artist("iu")
            .region("서울")
            .date(DateFilter::range("2025년 5월 1일", "2025년 5월 31일")),
    );

    assert_eq!(ids(&festivals, &filters, day(2025, 5, 1)), vec!["a"]);
}

#[test]
fn test_unknown_status_survives_active_view_and_text_facets() {
    let festivals = vec![Festival::new("x", "미정 축제")
        .with_university_name("한양대학교")
        .with_dates(text_date("곧 공개"), text_date("곧 공개"))];

    let filters = FilterState {
        school: "한양".to_string(),
        date: DateFilter::day("2025-05-16"),
        ..FilterState::default()
    };
    let listed = apply(&festivals, &filters, day(2025, 5, 16));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].lifecycle.status, FestivalStatus::Unknown);
    assert_eq!(listed[0].lifecycle.status_label, "정보 없음");
}

#[test]
fn test_one_malformed_record_does_not_affect_others() {
    let festivals = vec![
        festival("good", "A대학교", "2025-05-16", "2025-05-16"),
        festival("bad", "B대학교", "5월 중순", "???"),
        festival("other", "C대학교", "2025-06-01", "2025-06-01"),
    ];

    let listed = ids(&festivals, &date_filter("2025-05-16", ""), day(2025, 5, 1));
    assert_eq!(listed, vec!["good", "bad"]);
}

#[test]
fn test_listed_festivals_serialize_with_status_fields() {
    let festivals = vec![festival("a", "A대학교", "2025-05-16", "2025-05-17")];
    let listed = apply(&festivals, &FilterState::default(), day(2025, 5, 14));

    let value = serde_json::to_value(&listed).unwrap();
    assert_eq!(value[0]["id"], "a");
    assert_eq!(value[0]["universityName"], "A대학교");
    assert_eq!(value[0]["status"], "upcoming");
    assert_eq!(value[0]["statusLabel"], "D-2");
    assert_eq!(value[0]["daysRemaining"], 2);
}
