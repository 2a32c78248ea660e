//! Leader-line annotations: time, wind, and pressure per observation.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use tc_common::Color;

use crate::config::PlotConfig;
use crate::draw::thick_line;
use ibtracs::TrackPoint;

/// Annotation text for one observation:
/// `"<DD/HH>Z, <wind> KTS, <pressure> hPa"`, with `-` standing in for a
/// missing official value (only reachable with the WMO filter disabled).
pub fn annotation_text(point: &TrackPoint) -> String {
    format!(
        "{}Z, {} KTS, {} hPa",
        point.time.format("%d/%H"),
        format_metric(point.wmo_wind),
        format_metric(point.wmo_pres),
    )
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

/// Pixel offset of the label anchor for a row index. Even indices go right
/// and above, odd indices left and below; strict alternation regardless of
/// the row's data. The y component is in "up positive" convention.
pub fn annotation_offset(index: usize, config: &PlotConfig) -> (i32, i32) {
    if index % 2 == 0 {
        config.annotation_offset_pos
    } else {
        config.annotation_offset_neg
    }
}

/// Draw one leader-line label: a line from the marker edge to the label
/// anchor, a white background box, and the text.
pub fn draw_annotation(
    img: &mut RgbaImage,
    font: &Font<'_>,
    point_px: (f32, f32),
    offset: (i32, i32),
    text: &str,
    config: &PlotConfig,
) {
    let anchor = (
        point_px.0 + offset.0 as f32,
        point_px.1 - offset.1 as f32,
    );

    // Leader starts at the marker edge, not its center, so the marker face
    // stays clean.
    let (dx, dy) = (anchor.0 - point_px.0, anchor.1 - point_px.1);
    let len = (dx * dx + dy * dy).sqrt();
    let start = if len > f32::EPSILON {
        let clearance = config.marker_size / 2.0 + config.marker_edge_width;
        (
            point_px.0 + dx / len * clearance,
            point_px.1 + dy / len * clearance,
        )
    } else {
        point_px
    };
    thick_line(img, start, anchor, 1.0, Color::rgb(0, 0, 0));

    let (text_x, text_y) = (anchor.0 as i32, anchor.1 as i32 - config.font_size as i32 / 2);
    draw_text_background(img, text, text_x, text_y, config.font_size);
    draw_text_mut(
        img,
        Rgba([0, 0, 0, 255]),
        text_x,
        text_y,
        Scale::uniform(config.font_size),
        font,
        text,
    );
}

/// White box behind the text for readability over map line work.
fn draw_text_background(img: &mut RgbaImage, text: &str, x: i32, y: i32, font_size: f32) {
    let padding = 2i32;
    // Rough monospace-ish estimate of the rendered extent.
    let char_width = (font_size * 0.6) as i32;
    let text_width = text.len() as i32 * char_width;
    let text_height = font_size as i32;

    let left = x - padding;
    let top = y - padding;
    let width = (text_width + 2 * padding).max(1) as u32;
    let height = (text_height + 2 * padding).max(1) as u32;

    // Clip to the raster; fully off-screen labels draw nothing.
    if left >= img.width() as i32 || top >= img.height() as i32 {
        return;
    }
    imageproc::drawing::draw_filled_rect_mut(
        img,
        Rect::at(left, top).of_size(width, height),
        Rgba([255, 255, 255, 255]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ibtracs::RadiiSet;

    fn point(wind: Option<f64>, pres: Option<f64>) -> TrackPoint {
        TrackPoint {
            time: chrono::Utc.with_ymd_and_hms(2020, 8, 18, 12, 0, 0).unwrap(),
            lat: 20.0,
            lon_180: -40.0,
            lon: 320.0,
            wmo_wind: wind,
            wmo_pres: pres,
            usa: RadiiSet::default(),
            reunion: RadiiSet::default(),
            bom: RadiiSet::default(),
        }
    }

    #[test]
    fn test_annotation_text() {
        let text = annotation_text(&point(Some(50.0), Some(980.0)));
        assert_eq!(text, "18/12Z, 50 KTS, 980 hPa");
        assert!(text.ends_with("50 KTS, 980 hPa"));
    }

    #[test]
    fn test_annotation_text_zero_padding() {
        let mut p = point(Some(50.0), Some(980.0));
        p.time = chrono::Utc.with_ymd_and_hms(2020, 8, 5, 6, 0, 0).unwrap();
        assert!(annotation_text(&p).starts_with("05/06Z"));
    }

    #[test]
    fn test_annotation_text_missing_values() {
        let text = annotation_text(&point(None, None));
        assert_eq!(text, "18/12Z, - KTS, - hPa");
    }

    #[test]
    fn test_offset_alternates_strictly() {
        let cfg = PlotConfig::default();
        for i in 0..7 {
            let expected = if i % 2 == 0 {
                cfg.annotation_offset_pos
            } else {
                cfg.annotation_offset_neg
            };
            assert_eq!(annotation_offset(i, &cfg), expected, "index {i}");
        }
    }
}
