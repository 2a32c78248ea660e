//! Low-level line drawing helpers shared by the map layers.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use tc_common::Color;

pub fn rgba(color: Color) -> Rgba<u8> {
    let (r, g, b, a) = color.to_rgba();
    Rgba([r, g, b, a])
}

/// A straight segment with the given line width.
///
/// `imageproc` segments are one pixel wide; wider strokes are built from
/// parallel segments offset along the perpendicular.
pub fn thick_line(
    img: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Color,
) {
    let color = rgba(color);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();

    if len < f32::EPSILON || width <= 1.0 {
        draw_line_segment_mut(img, start, end, color);
        return;
    }

    // Unit perpendicular.
    let (nx, ny) = (-dy / len, dx / len);
    let strokes = width.ceil().max(1.0) as i32;
    let half = (strokes - 1) as f32 / 2.0;

    for i in 0..strokes {
        let offset = i as f32 - half;
        let shift = (nx * offset, ny * offset);
        draw_line_segment_mut(
            img,
            (start.0 + shift.0, start.1 + shift.1),
            (end.0 + shift.0, end.1 + shift.1),
            color,
        );
    }
}

/// A polyline drawn as consecutive thick segments.
pub fn polyline(img: &mut RgbaImage, points: &[(f32, f32)], width: f32, color: Color) {
    for pair in points.windows(2) {
        thick_line(img, pair[0], pair[1], width, color);
    }
}

/// A dashed 1-pixel line with the given on/off period in pixels.
pub fn dashed_line(
    img: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    dash_on: f32,
    dash_off: f32,
    color: Color,
) {
    let color = rgba(color);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return;
    }

    let (ux, uy) = (dx / len, dy / len);
    let period = dash_on + dash_off;
    let mut travelled = 0.0f32;
    while travelled < len {
        let seg_end = (travelled + dash_on).min(len);
        draw_line_segment_mut(
            img,
            (start.0 + ux * travelled, start.1 + uy * travelled),
            (start.0 + ux * seg_end, start.1 + uy * seg_end),
            color,
        );
        travelled += period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thick_line_covers_width() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        thick_line(&mut img, (10.0, 32.0), (54.0, 32.0), 3.0, Color::rgb(0, 0, 0));

        // Center row and one row either side should be painted.
        for y in [31, 32, 33] {
            assert_eq!(img.get_pixel(32, y).0, [0, 0, 0, 255], "row {y} not painted");
        }
        assert_eq!(img.get_pixel(32, 28).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut img = RgbaImage::from_pixel(64, 8, Rgba([255, 255, 255, 255]));
        dashed_line(&mut img, (0.0, 4.0), (63.0, 4.0), 4.0, 4.0, Color::rgb(0, 0, 0));

        let row: Vec<bool> = (0..64).map(|x| img.get_pixel(x, 4).0 == [0, 0, 0, 255]).collect();
        assert!(row.iter().any(|&p| p), "nothing drawn");
        assert!(row.iter().any(|&p| !p), "no gaps");
    }

    #[test]
    fn test_degenerate_segment_is_noop_safe() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        thick_line(&mut img, (4.0, 4.0), (4.0, 4.0), 2.0, Color::rgb(255, 0, 0));
        dashed_line(&mut img, (4.0, 4.0), (4.0, 4.0), 2.0, 2.0, Color::rgb(255, 0, 0));
    }
}
