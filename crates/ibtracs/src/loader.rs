//! Archive loading: select and transform the rows for one storm-year.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tc_common::time::{parse_iso_time, year_window, TimeParseError};
use thiserror::Error;
use tracing::debug;

use crate::columns::{self, Columns};
use crate::track::{Agency, RadiiSet, Track, TrackPoint, WindRadii};

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading the archive. All of these are fatal; an
/// empty result is not an error (see [`load_track`]).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse archive: {0}")]
    Csv(#[from] csv::Error),

    #[error("archive is missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: TimeParseError,
    },

    #[error("invalid {field} value: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("invalid year: {0}")]
    InvalidYear(i32),
}

/// Loader options with their documented defaults.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Drop rows whose WMO wind or pressure field is blank (default `true`).
    /// Disable for years/sources where the official fields are known to be
    /// unpopulated; that is a caller decision, never inferred from the data.
    pub filter_missing_wmo: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            filter_missing_wmo: true,
        }
    }
}

/// Convert a signed longitude in [-180, 180] to [0, 360).
pub fn normalize_lon(lon: f64) -> f64 {
    (360.0 + (lon % 360.0)) % 360.0
}

/// Load the ordered track rows for `name` (exact, case-sensitive match)
/// within calendar year `year`.
///
/// The first data record of the archive is a units row and is always
/// skipped. Zero matching rows is not an error: the result is an empty
/// track and the caller decides whether that warrants a warning.
pub fn load_track(
    archive: &Path,
    name: &str,
    year: i32,
    options: &LoadOptions,
) -> LoadResult<Track> {
    let file = File::open(archive)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let cols = Columns::from_headers(reader.headers()?)?;
    let (year_start, year_end) = year_window(year).map_err(|_| LoadError::InvalidYear(year))?;

    let mut points = Vec::new();
    let mut scanned = 0usize;

    // The first record carries units, not an observation.
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if i == 0 {
            continue;
        }
        scanned += 1;

        if field(&record, cols.name) != name {
            continue;
        }

        let time_str = field(&record, cols.iso_time);
        let time = parse_iso_time(time_str).map_err(|source| LoadError::InvalidTime {
            value: time_str.to_string(),
            source,
        })?;
        if time < year_start || time >= year_end {
            continue;
        }

        let wmo_wind = parse_optional(field(&record, cols.wmo_wind));
        let wmo_pres = parse_optional(field(&record, cols.wmo_pres));
        if options.filter_missing_wmo && (wmo_wind.is_none() || wmo_pres.is_none()) {
            continue;
        }

        let lat = parse_required(field(&record, cols.lat), "LAT")?;
        let lon_180 = parse_required(field(&record, cols.lon), "LON")?;

        points.push(TrackPoint {
            time,
            lat,
            lon_180,
            lon: normalize_lon(lon_180),
            wmo_wind,
            wmo_pres,
            usa: read_radii_set(&record, &cols, Agency::Usa),
            reunion: read_radii_set(&record, &cols, Agency::Reunion),
            bom: read_radii_set(&record, &cols, Agency::Bom),
        });
    }

    debug!(
        storm = name,
        year,
        scanned,
        matched = points.len(),
        "scanned archive"
    );

    Ok(Track {
        name: name.to_string(),
        year,
        points,
    })
}

/// A trimmed field value; out-of-range indices read as blank.
fn field<'r>(record: &'r csv::StringRecord, index: usize) -> &'r str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// Blank or non-numeric values are "no data", never an error.
fn parse_optional(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

/// Position fields must parse; a malformed one means the archive row is
/// unusable.
fn parse_required(value: &str, name: &'static str) -> LoadResult<f64> {
    value.parse().map_err(|_| LoadError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}

fn read_radii_set(record: &csv::StringRecord, cols: &Columns, agency: Agency) -> RadiiSet {
    RadiiSet {
        r34: read_radii(record, cols, agency, 34),
        r50: read_radii(record, cols, agency, 50),
        r64: read_radii(record, cols, agency, 64),
    }
}

fn read_radii(
    record: &csv::StringRecord,
    cols: &Columns,
    agency: Agency,
    threshold: u32,
) -> WindRadii {
    let quadrant = |q: &str| -> Option<f64> {
        let index = cols.get(&columns::radii_column(agency, threshold, q))?;
        parse_optional(field(record, index))
    };

    WindRadii {
        ne: quadrant("NE"),
        se: quadrant("SE"),
        sw: quadrant("SW"),
        nw: quadrant("NW"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lon_range() {
        let mut lon = -180.0;
        while lon < 180.0 {
            let n = normalize_lon(lon);
            assert!((0.0..360.0).contains(&n), "normalize({lon}) = {n}");
            lon += 7.3;
        }
    }

    #[test]
    fn test_normalize_lon_periodic() {
        for lon in [-180.0, -40.0, -0.5, 0.0, 10.0, 179.9] {
            let a = normalize_lon(lon);
            let b = normalize_lon(lon + 360.0);
            assert!((a - b).abs() < 1e-9, "normalize not periodic at {lon}");
        }
    }

    #[test]
    fn test_normalize_lon_values() {
        assert_eq!(normalize_lon(-40.0), 320.0);
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(170.0), 170.0);
        assert_eq!(normalize_lon(-180.0), 180.0);
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(""), None);
        assert_eq!(parse_optional("abc"), None);
        assert_eq!(parse_optional("50"), Some(50.0));
        assert_eq!(parse_optional("50.5"), Some(50.5));
    }
}
