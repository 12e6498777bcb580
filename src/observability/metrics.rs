//! Metrics for the filtering and calendar passes.
//!
//! Recording goes through the `metrics` facade, so every call is a no-op
//! until the host installs a recorder.

use std::fmt;

/// All metric names used by the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Loader metrics
    DatesUnparseable,
    FestivalsLoaded,
    DocumentsSkipped,

    // Filter metrics
    FilterPasses,
    FilterResultSize,

    // Calendar metrics
    CalendarDays,
    CalendarSpansClamped,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::DatesUnparseable => "campus_fest_dates_unparseable_total",
            MetricName::FestivalsLoaded => "campus_fest_festivals_loaded_total",
            MetricName::DocumentsSkipped => "campus_fest_documents_skipped_total",
            MetricName::FilterPasses => "campus_fest_filter_passes_total",
            MetricName::FilterResultSize => "campus_fest_filter_result_size",
            MetricName::CalendarDays => "campus_fest_calendar_days",
            MetricName::CalendarSpansClamped => "campus_fest_calendar_spans_clamped_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Loader Metrics
// ============================================================================

pub mod loader {
    use super::MetricName;

    /// Record a date field that could not be normalized
    pub fn date_unparseable(field: &'static str) {
        ::metrics::counter!(MetricName::DatesUnparseable.as_str(), "field" => field).increment(1);
    }

    pub fn festivals_loaded(count: usize) {
        ::metrics::counter!(MetricName::FestivalsLoaded.as_str()).increment(count as u64);
    }

    pub fn document_skipped() {
        ::metrics::counter!(MetricName::DocumentsSkipped.as_str()).increment(1);
    }
}

// ============================================================================
// Filter Metrics
// ============================================================================

pub mod filter {
    use super::MetricName;

    /// Record a completed filter pass and its result size
    pub fn pass_completed(result_size: usize) {
        ::metrics::counter!(MetricName::FilterPasses.as_str()).increment(1);
        ::metrics::histogram!(MetricName::FilterResultSize.as_str()).record(result_size as f64);
    }
}

// ============================================================================
// Calendar Metrics
// ============================================================================

pub mod calendar {
    use super::MetricName;

    pub fn days_aggregated(days: usize) {
        ::metrics::histogram!(MetricName::CalendarDays.as_str()).record(days as f64);
    }

    /// Record a festival interval cut down to its first day
    pub fn span_clamped() {
        ::metrics::counter!(MetricName::CalendarSpansClamped.as_str()).increment(1);
    }
}
