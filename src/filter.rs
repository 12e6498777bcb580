//! The composed festival filter: text facets, region, date window and the
//! active/ended toggle, applied as conjunctive steps in a fixed order.

use serde::Serialize;
use tracing::debug;

use crate::dates::CanonicalDate;
use crate::domain::Festival;
use crate::lifecycle::{classify_festival, Lifecycle};
use crate::observability::metrics;
use crate::range::{festival_intersects, DateFilter};

/// Current filter selection. Empty strings and an inactive date mean "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub date: DateFilter,
    pub school: String,
    pub artist: String,
    pub region: String,
    /// `true` keeps festivals that have not ended, `false` keeps only ended ones.
    pub show_only_active: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            date: DateFilter::Inactive,
            school: String::new(),
            artist: String::new(),
            region: String::new(),
            show_only_active: true,
        }
    }
}

/// Partial update merged into a [`FilterState`]; `None` leaves a facet untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub date: Option<DateFilter>,
    pub school: Option<String>,
    pub artist: Option<String>,
    pub region: Option<String>,
    pub show_only_active: Option<bool>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: DateFilter) -> Self {
        self.date = Some(date);
        self
    }

    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn show_only_active(mut self, show_only_active: bool) -> Self {
        self.show_only_active = Some(show_only_active);
        self
    }
}

impl FilterState {
    /// Merges the facets present in `patch`, leaving the others as they are.
    pub fn update(&mut self, patch: FilterPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(school) = patch.school {
            self.school = school;
        }
        if let Some(artist) = patch.artist {
            self.artist = artist;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(show_only_active) = patch.show_only_active {
            self.show_only_active = show_only_active;
        }
    }

    /// Resets every facet at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn is_step_active(&self, step: FilterStep) -> bool {
        match step {
            FilterStep::Artist => is_text_active(&self.artist),
            FilterStep::School => is_text_active(&self.school),
            FilterStep::Region => is_text_active(&self.region),
            FilterStep::Date => self.date.is_active(),
            FilterStep::Status => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStep {
    Artist,
    School,
    Region,
    Date,
    Status,
}

/// Order of the text facets when artist and school are both set.
pub const COMBINED_FACET_ORDER: [FilterStep; 2] = [FilterStep::Artist, FilterStep::School];

/// Order of the text facets when at most one of them is set.
pub const SINGLE_FACET_ORDER: [FilterStep; 2] = [FilterStep::School, FilterStep::Artist];

/// Steps after the text facets. The date window runs late because it is
/// the most expensive per record; the status toggle always runs last.
pub const TRAILING_STEPS: [FilterStep; 3] = [FilterStep::Region, FilterStep::Date, FilterStep::Status];

/// The ordered steps a pass over `filters` will run.
pub fn plan(filters: &FilterState) -> Vec<FilterStep> {
    let facet_order = if filters.is_step_active(FilterStep::Artist) && filters.is_step_active(FilterStep::School) {
        COMBINED_FACET_ORDER
    } else {
        SINGLE_FACET_ORDER
    };

    facet_order
        .into_iter()
        .chain(TRAILING_STEPS)
        .filter(|step| filters.is_step_active(*step))
        .collect()
}

/// A festival that survived a filter pass, with its status at pass time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedFestival<'a> {
    #[serde(flatten)]
    pub festival: &'a Festival,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

/// Runs one filter pass. Input order is preserved; `now` drives the status step.
pub fn apply<'a>(festivals: &'a [Festival], filters: &FilterState, now: CanonicalDate) -> Vec<ListedFestival<'a>> {
    let mut listed: Vec<ListedFestival<'a>> = festivals
        .iter()
        .map(|festival| ListedFestival {
            festival,
            lifecycle: classify_festival(festival, now),
        })
        .collect();

    for step in plan(filters) {
        listed.retain(|entry| keeps(step, entry, filters));
        debug!(?step, remaining = listed.len(), "Applied filter step");
    }

    metrics::filter::pass_completed(listed.len());
    listed
}

fn keeps(step: FilterStep, entry: &ListedFestival<'_>, filters: &FilterState) -> bool {
    match step {
        FilterStep::Artist => matches_artist(entry.festival, &filters.artist),
        FilterStep::School => matches_school(entry.festival, &filters.school),
        FilterStep::Region => matches_region(entry.festival, &filters.region),
        FilterStep::Date => festival_intersects(entry.festival, &filters.date),
        FilterStep::Status => entry.lifecycle.is_ended() != filters.show_only_active,
    }
}

pub fn matches_school(festival: &Festival, needle: &str) -> bool {
    contains_ignore_case(festival.school_name(), needle)
}

pub fn matches_artist(festival: &Festival, needle: &str) -> bool {
    festival
        .artists
        .iter()
        .any(|artist| contains_ignore_case(&artist.name, needle))
}

pub fn matches_region(festival: &Festival, needle: &str) -> bool {
    contains_ignore_case(festival.region(), needle)
}

fn is_text_active(value: &str) -> bool {
    !value.trim().is_empty()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
