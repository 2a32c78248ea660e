//! Track data model: one storm-year as an ordered sequence of observations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tc_common::BoundingBox;

/// Wind-radii reporting agency (the column prefix in the archive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Agency {
    #[default]
    Usa,
    Reunion,
    Bom,
}

impl Agency {
    pub const ALL: [Agency; 3] = [Agency::Usa, Agency::Reunion, Agency::Bom];

    /// The archive column prefix, e.g. `USA` in `USA_R34_NE`.
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Agency::Usa => "USA",
            Agency::Reunion => "REUNION",
            Agency::Bom => "BOM",
        }
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Agency::Usa => "usa",
            Agency::Reunion => "reunion",
            Agency::Bom => "bom",
        };
        f.write_str(s)
    }
}

impl FromStr for Agency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "usa" => Ok(Agency::Usa),
            "reunion" => Ok(Agency::Reunion),
            "bom" => Ok(Agency::Bom),
            other => Err(format!(
                "unknown agency '{other}' (expected usa, reunion, or bom)"
            )),
        }
    }
}

/// Four quadrant radii in nautical miles for one wind-speed threshold.
///
/// `None` means no wind at that threshold extends into the quadrant (or the
/// archive value was blank/non-numeric, which is treated the same way).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindRadii {
    pub ne: Option<f64>,
    pub se: Option<f64>,
    pub sw: Option<f64>,
    pub nw: Option<f64>,
}

impl WindRadii {
    /// All four quadrants, in the SE, NE, SW, NW order the renderer draws
    /// them, or `None` if any quadrant is absent. A ring is only drawable
    /// when complete.
    pub fn complete(&self) -> Option<[f64; 4]> {
        Some([self.se?, self.ne?, self.sw?, self.nw?])
    }
}

/// The three threshold rings reported by one agency for one observation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadiiSet {
    pub r34: WindRadii,
    pub r50: WindRadii,
    pub r64: WindRadii,
}

impl RadiiSet {
    /// Ring for a threshold in knots (34, 50 or 64).
    pub fn threshold(&self, knots: u32) -> Option<&WindRadii> {
        match knots {
            34 => Some(&self.r34),
            50 => Some(&self.r50),
            64 => Some(&self.r64),
            _ => None,
        }
    }
}

/// One observation time for one storm.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Observation time (UTC).
    pub time: DateTime<Utc>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude as stored in the archive, signed [-180, 180].
    pub lon_180: f64,
    /// Longitude normalized to [0, 360), used for map projection.
    pub lon: f64,
    /// Official (WMO) wind speed in knots, if reported.
    pub wmo_wind: Option<f64>,
    /// Official (WMO) central pressure in hPa, if reported.
    pub wmo_pres: Option<f64>,
    /// Wind radii per reporting agency.
    pub usa: RadiiSet,
    pub reunion: RadiiSet,
    pub bom: RadiiSet,
}

impl TrackPoint {
    pub fn radii(&self, agency: Agency) -> &RadiiSet {
        match agency {
            Agency::Usa => &self.usa,
            Agency::Reunion => &self.reunion,
            Agency::Bom => &self.bom,
        }
    }
}

/// An ordered track for one storm-year. Archive order is preserved and
/// assumed chronological; points are never merged or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub year: i32,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    /// Extent over (normalized longitude, latitude), or `None` for an empty
    /// track.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().map(|p| (p.lon, p.lat)))
    }
}
