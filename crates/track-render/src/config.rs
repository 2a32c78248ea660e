//! Plot configuration with documented defaults.
//!
//! Everything tunable about the output image lives here and is passed into
//! the rendering call; there is no mutable global state.

use std::path::PathBuf;

use ibtracs::Agency;
use serde::{Deserialize, Serialize};
use tc_common::Color;

/// Optional basemap overlays, drawn beneath the track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasemapConfig {
    /// Natural-Earth-style GeoJSON with coastline geometry.
    pub coastlines: Option<PathBuf>,
    /// Natural-Earth-style GeoJSON with political border geometry.
    pub borders: Option<PathBuf>,
}

/// Rendering options for one track plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Color for 34-knot wind radius rings (default crimson).
    pub color_r34: Color,
    /// Color for 50-knot wind radius rings (default blue).
    pub color_r50: Color,
    /// Color for 64-knot wind radius rings (default green).
    pub color_r64: Color,
    /// Line width for wind radii arcs and spokes (default 2.0).
    pub arc_line_width: f32,

    /// Marker size for track points (default 7.0).
    pub marker_size: f32,
    /// Marker edge width (default 2.5).
    pub marker_edge_width: f32,
    /// Marker face color (default blue).
    pub marker_face_color: Color,
    /// Marker edge color (default white).
    pub marker_edge_color: Color,

    /// Degrees of padding around the storm track bounding box (default 10.0).
    pub map_offset: f64,
    /// Grid line spacing in degrees for longitude (default 10.0).
    pub grid_lon_step: f64,
    /// Grid line spacing in degrees for latitude (default 10.0).
    pub grid_lat_step: f64,
    /// Raster resolution in pixels per degree (default 24.0).
    pub pixels_per_degree: f64,

    /// Divisor converting wind radii (nautical miles) to plot units
    /// (default 70.0, empirically tuned).
    pub radius_scale: f64,

    /// Which agency's radii columns to draw (default USA).
    #[serde(skip)]
    pub agency: Agency,

    /// Annotation offset in pixels for even row indices: right and above.
    pub annotation_offset_pos: (i32, i32),
    /// Annotation offset in pixels for odd row indices: left and below.
    pub annotation_offset_neg: (i32, i32),
    /// Annotation font size in pixels (default 16.0).
    pub font_size: f32,
    /// Explicit TrueType font path; falls back to common system fonts.
    pub font_path: Option<PathBuf>,

    /// Basemap overlay sources.
    pub basemap: BasemapConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            color_r34: Color::rgb(220, 20, 60),
            color_r50: Color::rgb(0, 0, 255),
            color_r64: Color::rgb(0, 128, 0),
            arc_line_width: 2.0,

            marker_size: 7.0,
            marker_edge_width: 2.5,
            marker_face_color: Color::rgb(0, 0, 255),
            marker_edge_color: Color::rgb(255, 255, 255),

            map_offset: 10.0,
            grid_lon_step: 10.0,
            grid_lat_step: 10.0,
            pixels_per_degree: 24.0,

            radius_scale: 70.0,

            agency: Agency::Usa,

            annotation_offset_pos: (180, 5),
            annotation_offset_neg: (-280, -5),
            font_size: 16.0,
            font_path: None,

            basemap: BasemapConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Ring color for a threshold in knots.
    pub fn threshold_color(&self, knots: u32) -> Color {
        match knots {
            50 => self.color_r50,
            64 => self.color_r64,
            _ => self.color_r34,
        }
    }
}
