//! Base map: coastline/border overlays and the graticule.

use std::path::Path;

use geojson::{GeoJson, Value};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};
use tc_common::Color;
use tracing::{debug, warn};

use crate::config::PlotConfig;
use crate::draw::{dashed_line, polyline};
use crate::error::{RenderError, RenderResult};
use crate::frame::MapFrame;
use ibtracs::normalize_lon;

/// Draw the configured basemap overlays beneath everything else. Missing
/// overlay files were never configured, so they are skipped silently; a
/// configured file that fails to load or parse is a hard error.
pub fn draw_overlays(img: &mut RgbaImage, frame: &MapFrame, config: &PlotConfig) -> RenderResult<()> {
    for path in [&config.basemap.coastlines, &config.basemap.borders]
        .into_iter()
        .flatten()
    {
        let lines = load_geojson_lines(path)?;
        debug!(path = %path.display(), lines = lines.len(), "drawing basemap overlay");
        for line in lines {
            draw_geo_polyline(img, frame, &line);
        }
    }

    if config.basemap.coastlines.is_none() && config.basemap.borders.is_none() {
        warn!("no basemap files configured; map background will be blank");
    }
    Ok(())
}

/// Extract every line string from a GeoJSON file as (lon, lat) vertex runs.
/// Polygons contribute their exterior ring outline.
pub fn load_geojson_lines(path: &Path) -> RenderResult<Vec<Vec<(f64, f64)>>> {
    let make_err = |message: String| RenderError::Basemap {
        path: path.display().to_string(),
        message,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| make_err(e.to_string()))?;
    let geojson: GeoJson = raw.parse().map_err(|e: geojson::Error| make_err(e.to_string()))?;

    let mut lines = Vec::new();
    collect_lines(&geojson, &mut lines);
    Ok(lines)
}

fn collect_lines(geojson: &GeoJson, out: &mut Vec<Vec<(f64, f64)>>) {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                if let Some(geometry) = &feature.geometry {
                    collect_geometry(&geometry.value, out);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_geometry(&geometry.value, out);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry(&geometry.value, out),
    }
}

fn collect_geometry(value: &Value, out: &mut Vec<Vec<(f64, f64)>>) {
    let to_line = |coords: &Vec<Vec<f64>>| -> Vec<(f64, f64)> {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect()
    };

    match value {
        Value::LineString(line) => out.push(to_line(line)),
        Value::MultiLineString(multi) => out.extend(multi.iter().map(to_line)),
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                out.push(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    out.push(to_line(exterior));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_geometry(&geometry.value, out);
            }
        }
        _ => {}
    }
}

/// Project a (signed lon, lat) polyline into the frame and draw it in
/// black, breaking the line where it crosses the 0/360 seam.
fn draw_geo_polyline(img: &mut RgbaImage, frame: &MapFrame, line: &[(f64, f64)]) {
    let mut run: Vec<(f32, f32)> = Vec::new();
    let mut prev_lon: Option<f64> = None;

    for &(lon, lat) in line {
        let lon = normalize_lon(lon);
        if let Some(prev) = prev_lon {
            if (lon - prev).abs() > 180.0 {
                polyline(img, &run, 1.0, Color::rgb(0, 0, 0));
                run.clear();
            }
        }
        prev_lon = Some(lon);
        run.push(frame.to_pixel(lon, lat));
    }
    polyline(img, &run, 1.0, Color::rgb(0, 0, 0));
}

/// Dashed latitude/longitude grid with edge labels: longitude along the
/// bottom, latitude along the right, in degree notation.
pub fn draw_graticule(
    img: &mut RgbaImage,
    frame: &MapFrame,
    config: &PlotConfig,
    font: Option<&Font<'_>>,
) {
    // Half-opacity black so the grid stays behind the track layers.
    let grid_color = Color::rgba(0, 0, 0, 128);
    let bbox = frame.bbox;

    for lon in grid_steps(bbox.min_x, bbox.max_x, config.grid_lon_step) {
        let (x, _) = frame.to_pixel(lon, bbox.min_y);
        dashed_line(
            img,
            (x, 0.0),
            (x, frame.height as f32),
            6.0,
            4.0,
            grid_color,
        );
        if let Some(font) = font {
            let label = format_lon(lon);
            let y = frame.height as i32 - config.font_size as i32 - 4;
            draw_grid_label(img, font, &label, x as i32 + 3, y, config.font_size);
        }
    }

    for lat in grid_steps(bbox.min_y, bbox.max_y, config.grid_lat_step) {
        let (_, y) = frame.to_pixel(bbox.min_x, lat);
        dashed_line(
            img,
            (0.0, y),
            (frame.width as f32, y),
            6.0,
            4.0,
            grid_color,
        );
        if let Some(font) = font {
            let label = format_lat(lat);
            let x = frame.width as i32 - (label.len() as i32 * (config.font_size * 0.6) as i32) - 4;
            draw_grid_label(img, font, &label, x, y as i32 + 3, config.font_size);
        }
    }
}

fn draw_grid_label(
    img: &mut RgbaImage,
    font: &Font<'_>,
    text: &str,
    x: i32,
    y: i32,
    font_size: f32,
) {
    draw_text_mut(
        img,
        Rgba([0, 0, 0, 255]),
        x,
        y,
        Scale::uniform(font_size),
        font,
        text,
    );
}

/// Multiples of `step` within `[min, max]`, ascending.
fn grid_steps(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || min > max {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max {
        values.push(v);
        v += step;
    }
    values
}

/// Degree label for a normalized longitude, e.g. `320 -> "40°W"`.
fn format_lon(lon: f64) -> String {
    let mut signed = lon % 360.0;
    if signed > 180.0 {
        signed -= 360.0;
    }
    if signed == 0.0 || signed == 180.0 || signed == -180.0 {
        format!("{}°", signed.abs())
    } else if signed < 0.0 {
        format!("{}°W", -signed)
    } else {
        format!("{}°E", signed)
    }
}

/// Degree label for a latitude, e.g. `20 -> "20°N"`.
fn format_lat(lat: f64) -> String {
    if lat == 0.0 {
        "0°".to_string()
    } else if lat < 0.0 {
        format!("{}°S", -lat)
    } else {
        format!("{}°N", lat)
    }
}
