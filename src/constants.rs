//! Display constants shared by the lifecycle, calendar and store layers.

// Placeholders for records with missing identity
pub const PLACEHOLDER_NAME: &str = "이름 없음";
pub const PLACEHOLDER_SCHOOL_NAME: &str = "미정";
pub const PLACEHOLDER_ARTIST_TIME: &str = "시간 미정";

// Lifecycle labels
pub const LABEL_ONGOING: &str = "진행중";
pub const LABEL_ENDED: &str = "종료";
pub const LABEL_UNKNOWN: &str = "정보 없음";

/// "D-<n>" label for upcoming festivals
pub fn countdown_label(days_remaining: i64) -> String {
    format!("D-{}", days_remaining)
}
