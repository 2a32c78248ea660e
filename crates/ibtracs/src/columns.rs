//! Archive column names and header lookup.

use std::collections::HashMap;

use csv::StringRecord;

use crate::loader::LoadError;
use crate::track::Agency;

/// Core columns that must be present in the archive.
pub const NAME: &str = "NAME";
pub const ISO_TIME: &str = "ISO_TIME";
pub const WMO_WIND: &str = "WMO_WIND";
pub const WMO_PRES: &str = "WMO_PRES";
pub const LAT: &str = "LAT";
pub const LON: &str = "LON";

/// Wind-speed thresholds with radii columns in the archive, in knots.
pub const THRESHOLDS: [u32; 3] = [34, 50, 64];

/// Quadrant suffixes as the archive spells them.
pub const QUADRANTS: [&str; 4] = ["NE", "SE", "SW", "NW"];

/// Column name for one agency/threshold/quadrant, e.g. `USA_R34_NE`.
pub fn radii_column(agency: Agency, threshold: u32, quadrant: &str) -> String {
    format!("{}_R{}_{}", agency.column_prefix(), threshold, quadrant)
}

/// Resolved positions of the extracted columns within the header row.
///
/// The six core columns are required; radii columns are looked up lazily and
/// an absent column reads as a missing value for every row.
#[derive(Debug)]
pub struct Columns {
    pub name: usize,
    pub iso_time: usize,
    pub wmo_wind: usize,
    pub wmo_pres: usize,
    pub lat: usize,
    pub lon: usize,
    by_name: HashMap<String, usize>,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();

        let required = |col: &str| -> Result<usize, LoadError> {
            by_name
                .get(col)
                .copied()
                .ok_or_else(|| LoadError::MissingColumn(col.to_string()))
        };

        Ok(Self {
            name: required(NAME)?,
            iso_time: required(ISO_TIME)?,
            wmo_wind: required(WMO_WIND)?,
            wmo_pres: required(WMO_PRES)?,
            lat: required(LAT)?,
            lon: required(LON)?,
            by_name,
        })
    }

    /// Position of an optional column, e.g. a radii column.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.by_name.get(column).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_column_names() {
        assert_eq!(radii_column(Agency::Usa, 34, "NE"), "USA_R34_NE");
        assert_eq!(radii_column(Agency::Reunion, 50, "SW"), "REUNION_R50_SW");
        assert_eq!(radii_column(Agency::Bom, 64, "NW"), "BOM_R64_NW");
    }

    #[test]
    fn test_missing_required_column() {
        let headers = StringRecord::from(vec!["NAME", "ISO_TIME", "LAT", "LON"]);
        let err = Columns::from_headers(&headers).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == "WMO_WIND"));
    }

    #[test]
    fn test_header_lookup() {
        let headers = StringRecord::from(vec![
            "NAME", "ISO_TIME", "WMO_WIND", "WMO_PRES", "LAT", "LON", "USA_R34_NE",
        ]);
        let cols = Columns::from_headers(&headers).unwrap();
        assert_eq!(cols.lat, 4);
        assert_eq!(cols.get("USA_R34_NE"), Some(6));
        assert_eq!(cols.get("USA_R34_SE"), None);
    }
}
