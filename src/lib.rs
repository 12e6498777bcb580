pub mod calendar;
pub mod config;
pub mod constants;
pub mod dates;
pub mod domain;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod loader;
pub mod logging;
pub mod observability;
pub mod range;
pub mod store;

pub use calendar::{aggregate, aggregate_for_date, ArtistEvent, CalendarDay, CalendarMap, CalendarView};
pub use dates::{iso_day_key, normalize, CanonicalDate, RawDateValue};
pub use domain::{Festival, FestivalArtist, FestivalDate};
pub use error::{FestivalError, Result};
pub use filter::{apply, FilterPatch, FilterState, ListedFestival};
pub use lifecycle::{classify, FestivalStatus, Lifecycle};
pub use range::{intersects, DateFilter};
pub use store::FestivalStore;
