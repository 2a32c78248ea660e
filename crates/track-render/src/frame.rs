//! Equirectangular mapping from geographic degrees to pixel coordinates.

use tc_common::BoundingBox;

/// Smallest edge the raster can shrink to, in pixels.
const MIN_DIMENSION: u32 = 256;
/// Largest edge the raster can grow to, in pixels.
const MAX_DIMENSION: u32 = 8192;

/// The pixel frame of one plot: a geographic bounding box (normalized
/// longitude, latitude) stretched over a raster.
///
/// North is up; x grows eastward, y grows southward.
#[derive(Debug, Clone, Copy)]
pub struct MapFrame {
    pub bbox: BoundingBox,
    pub width: u32,
    pub height: u32,
}

impl MapFrame {
    /// Size a raster for `bbox` at the given resolution, clamping both
    /// dimensions to sane raster limits.
    pub fn fit(bbox: BoundingBox, pixels_per_degree: f64) -> Self {
        let width = (bbox.width() * pixels_per_degree).round() as i64;
        let height = (bbox.height() * pixels_per_degree).round() as i64;
        Self {
            bbox,
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    /// Project (normalized longitude, latitude) to pixel coordinates.
    /// Points outside the bbox project outside the raster; callers clip.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let x = (lon - self.bbox.min_x) / self.bbox.width() * self.width as f64;
        let y = (self.bbox.max_y - lat) / self.bbox.height() * self.height as f64;
        (x as f32, y as f32)
    }

    /// Horizontal raster resolution in pixels per degree. Plot-unit radii
    /// are converted to pixel radii with this factor.
    pub fn pixels_per_degree(&self) -> f64 {
        self.width as f64 / self.bbox.width()
    }

    pub fn contains_pixel(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> MapFrame {
        // 40 x 20 degrees at 24 px/deg: 960 x 480.
        MapFrame::fit(BoundingBox::new(300.0, 10.0, 340.0, 30.0), 24.0)
    }

    #[test]
    fn test_fit_dimensions() {
        let f = frame();
        assert_eq!(f.width, 960);
        assert_eq!(f.height, 480);
        assert_eq!(f.pixels_per_degree(), 24.0);
    }

    #[test]
    fn test_fit_clamps_tiny_extents() {
        let f = MapFrame::fit(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 1.0);
        assert_eq!(f.width, 256);
        assert_eq!(f.height, 256);
    }

    #[test]
    fn test_corner_projection() {
        let f = frame();
        assert_eq!(f.to_pixel(300.0, 30.0), (0.0, 0.0));
        assert_eq!(f.to_pixel(340.0, 10.0), (960.0, 480.0));
    }

    #[test]
    fn test_north_is_up() {
        let f = frame();
        let (_, y_north) = f.to_pixel(320.0, 25.0);
        let (_, y_south) = f.to_pixel(320.0, 15.0);
        assert!(y_north < y_south);
    }

    #[test]
    fn test_contains_pixel() {
        let f = frame();
        assert!(f.contains_pixel(0.0, 0.0));
        assert!(f.contains_pixel(959.9, 479.9));
        assert!(!f.contains_pixel(960.0, 100.0));
        assert!(!f.contains_pixel(-0.1, 100.0));
    }
}
