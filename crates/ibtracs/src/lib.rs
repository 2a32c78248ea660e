//! Reading and filtering IBTrACS storm track data.
//!
//! The archive is one large CSV with a column-name header followed by a
//! units row, then one row per storm observation. [`load_track`] extracts
//! the ordered observations for a single named storm in a single year.

pub mod columns;
pub mod loader;
pub mod track;

pub use loader::{load_track, normalize_lon, LoadError, LoadOptions, LoadResult};
pub use track::{Agency, RadiiSet, Track, TrackPoint, WindRadii};
