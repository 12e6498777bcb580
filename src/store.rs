use crate::dates::CanonicalDate;
use crate::domain::Festival;
use crate::filter::{self, FilterPatch, FilterState, ListedFestival};

/// Holds the loaded collection and the current filter selection.
///
/// The collection is replaced wholesale on refresh. Filtered views are
/// recomputed on every call, so results never depend on call history.
#[derive(Debug, Clone, Default)]
pub struct FestivalStore {
    festivals: Vec<Festival>,
    filters: FilterState,
}

impl FestivalStore {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self {
            festivals,
            filters: FilterState::default(),
        }
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn replace_festivals(&mut self, festivals: Vec<Festival>) {
        self.festivals = festivals;
    }

    pub fn update_filters(&mut self, patch: FilterPatch) {
        self.filters.update(patch);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filtered(&self, now: CanonicalDate) -> Vec<ListedFestival<'_>> {
        filter::apply(&self.festivals, &self.filters, now)
    }

    pub fn festival_by_id(&self, id: &str) -> Option<&Festival> {
        self.festivals.iter().find(|festival| festival.id == id)
    }

    // Direct lookups over the whole collection, ignoring the active filters

    pub fn festivals_by_school(&self, school: &str) -> Vec<&Festival> {
        self.festivals
            .iter()
            .filter(|festival| filter::matches_school(festival, school))
            .collect()
    }

    pub fn festivals_by_artist(&self, artist: &str) -> Vec<&Festival> {
        self.festivals
            .iter()
            .filter(|festival| filter::matches_artist(festival, artist))
            .collect()
    }

    pub fn festivals_by_region(&self, region: &str) -> Vec<&Festival> {
        self.festivals
            .iter()
            .filter(|festival| filter::matches_region(festival, region))
            .collect()
    }
}
