use serde::Serialize;

use crate::constants::{PLACEHOLDER_NAME, PLACEHOLDER_SCHOOL_NAME};
use crate::dates::{normalize, CanonicalDate, RawDateValue};

/// A festival bound as it arrived from the loader: parsed, or kept raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FestivalDate {
    Valid(CanonicalDate),
    Unparseable(String),
}

impl FestivalDate {
    pub fn from_raw(raw: &RawDateValue) -> Self {
        match normalize(raw) {
            Ok(date) => FestivalDate::Valid(date),
            Err(_) => FestivalDate::Unparseable(raw.describe()),
        }
    }

    pub fn valid(&self) -> Option<CanonicalDate> {
        match self {
            FestivalDate::Valid(date) => Some(*date),
            FestivalDate::Unparseable(_) => None,
        }
    }
}

impl From<CanonicalDate> for FestivalDate {
    fn from(date: CanonicalDate) -> Self {
        FestivalDate::Valid(date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct University {
    pub id: Option<String>,
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Location {
    pub region: String,
    pub address: String,
}

/// A performer on a festival line-up. The name is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FestivalArtist {
    pub name: String,
    pub time: Option<String>,
}

impl FestivalArtist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), time: None }
    }

    pub fn at(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: Some(time.into()),
        }
    }
}

/// Read model of a festival. The core never mutates one after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    pub id: String,
    pub name: String,
    pub university_name: Option<String>,
    pub school: Option<String>,
    pub university: Option<University>,
    pub start_date: Option<FestivalDate>,
    pub end_date: Option<FestivalDate>,
    pub location: Location,
    pub artists: Vec<FestivalArtist>,
    pub description: String,
    pub image_url: Option<String>,
}

impl Festival {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dates(mut self, start: Option<FestivalDate>, end: Option<FestivalDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets both bounds from raw values; a missing end mirrors the start.
    pub fn with_raw_dates(self, start: &RawDateValue, end: Option<&RawDateValue>) -> Self {
        let start = FestivalDate::from_raw(start);
        let end = end.map(FestivalDate::from_raw).unwrap_or_else(|| start.clone());
        self.with_dates(Some(start), Some(end))
    }

    pub fn with_university_name(mut self, name: impl Into<String>) -> Self {
        self.university_name = Some(name.into());
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn with_university(mut self, university: University) -> Self {
        self.university = Some(university);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.location.region = region.into();
        self
    }

    pub fn with_artist(mut self, artist: FestivalArtist) -> Self {
        self.artists.push(artist);
        self
    }

    /// Display school name: university.name, universityName, school, then id.
    pub fn school_name(&self) -> &str {
        let candidates = [
            self.university.as_ref().map(|u| u.name.as_str()),
            self.university_name.as_deref(),
            self.school.as_deref(),
            Some(self.id.as_str()),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or(PLACEHOLDER_SCHOOL_NAME)
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            PLACEHOLDER_NAME
        } else {
            &self.name
        }
    }

    pub fn region(&self) -> &str {
        &self.location.region
    }
}
