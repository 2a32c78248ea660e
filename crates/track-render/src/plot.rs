//! Track plot composition and image persistence.

use std::path::Path;
use std::process::Command;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use tc_common::BoundingBox;
use tracing::{debug, info, warn};

use crate::annotate::{annotation_offset, annotation_text, draw_annotation};
use crate::basemap::{draw_graticule, draw_overlays};
use crate::config::PlotConfig;
use crate::draw::rgba;
use crate::error::{RenderError, RenderResult};
use crate::font::load_font;
use crate::frame::MapFrame;
use crate::radii::{draw_ring, ring_geometry, scaled_radii};
use ibtracs::Track;

/// Extent used when the track has no points: a blank world map instead of a
/// failure, since base map setup does not depend on track content.
const EMPTY_TRACK_EXTENT: BoundingBox = BoundingBox {
    min_x: 0.0,
    min_y: -80.0,
    max_x: 360.0,
    max_y: 80.0,
};

/// Render a complete track plot: base map, then per observation in order
/// the wind-radii rings, the point marker, and the alternating-side
/// annotation.
pub fn plot_track(track: &Track, config: &PlotConfig) -> RenderResult<RgbaImage> {
    let frame = track_frame(track, config);
    debug!(
        width = frame.width,
        height = frame.height,
        bbox = ?frame.bbox,
        "sized plot frame"
    );

    let mut img = RgbaImage::from_pixel(frame.width, frame.height, Rgba([255, 255, 255, 255]));

    draw_overlays(&mut img, &frame, config)?;
    let font = load_font(config.font_path.as_deref());
    draw_graticule(&mut img, &frame, config, font.as_ref());

    if track.is_empty() {
        warn!(storm = %track.name, year = track.year, "track has no points; rendering blank map");
        return Ok(img);
    }

    let px_per_degree = frame.pixels_per_degree() as f32;

    for (index, point) in track.iter().enumerate() {
        let (cx, cy) = frame.to_pixel(point.lon, point.lat);

        // Wind radii rings, one per complete threshold group.
        let radii_set = point.radii(config.agency);
        for threshold in ibtracs::columns::THRESHOLDS {
            let ring = radii_set
                .threshold(threshold)
                .and_then(|r| scaled_radii(r, config.radius_scale));
            if let Some(plot_units) = ring {
                let pixel_radii = plot_units.map(|r| r as f32 * px_per_degree);
                let geometry = ring_geometry(cx, cy, pixel_radii);
                draw_ring(
                    &mut img,
                    &geometry,
                    config.arc_line_width,
                    config.threshold_color(threshold),
                );
            }
        }

        draw_marker(&mut img, (cx, cy), config);

        if let Some(font) = font.as_ref() {
            draw_annotation(
                &mut img,
                font,
                (cx, cy),
                annotation_offset(index, config),
                &annotation_text(point),
                config,
            );
        }
    }

    Ok(img)
}

fn track_frame(track: &Track, config: &PlotConfig) -> MapFrame {
    let bbox = match track.bounding_box() {
        Some(b) => b.expand(config.map_offset),
        None => EMPTY_TRACK_EXTENT,
    };
    MapFrame::fit(bbox, config.pixels_per_degree)
}

/// White-edged colored-fill circle at the projected track point.
fn draw_marker(img: &mut RgbaImage, center: (f32, f32), config: &PlotConfig) {
    let center = (center.0.round() as i32, center.1.round() as i32);
    let face_radius = (config.marker_size / 2.0).round().max(1.0) as i32;
    let edge_radius = face_radius + config.marker_edge_width.round().max(1.0) as i32;

    draw_filled_circle_mut(img, center, edge_radius, rgba(config.marker_edge_color));
    draw_filled_circle_mut(img, center, face_radius, rgba(config.marker_face_color));
}

/// Persist the finished image. The format follows the file extension; the
/// default CLI path is a PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> RenderResult<()> {
    img.save(path)
        .map_err(|e| RenderError::ImageWrite(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "plot saved");
    Ok(())
}

/// Write the image to a temporary PNG and hand it to the platform viewer.
pub fn show(img: &RgbaImage) -> RenderResult<()> {
    let file = tempfile::Builder::new()
        .prefix("tc-track-")
        .suffix(".png")
        .tempfile()?;
    let path = file.into_temp_path();
    let path = path
        .keep()
        .map_err(|e| RenderError::ImageWrite(e.to_string()))?;
    save_png(img, &path)?;

    let viewer = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let status = Command::new(viewer)
        .arg(&path)
        .status()
        .map_err(|e| RenderError::Viewer(format!("{viewer}: {e}")))?;
    if !status.success() {
        return Err(RenderError::Viewer(format!(
            "{viewer} exited with {status}"
        )));
    }
    Ok(())
}
