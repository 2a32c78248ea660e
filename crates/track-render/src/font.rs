//! TrueType font loading for map labels and annotations.
//!
//! Text layers need a real font file. An explicit path from the config is
//! tried first, then a handful of common system locations. When nothing
//! loads, text is skipped with a warning and geometry is still drawn.

use std::path::Path;

use rusttype::Font;
use tracing::{debug, warn};

/// System font locations tried in order when no explicit path is given.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
];

/// Load a label font, preferring `explicit` when given.
pub fn load_font(explicit: Option<&Path>) -> Option<Font<'static>> {
    if let Some(path) = explicit {
        match try_load(path) {
            Some(font) => return Some(font),
            None => warn!(path = %path.display(), "could not load configured font"),
        }
    }

    for candidate in SYSTEM_FONT_PATHS {
        let path = Path::new(candidate);
        if let Some(font) = try_load(path) {
            debug!(path = candidate, "loaded system font");
            return Some(font);
        }
    }

    warn!("no usable font found; labels and annotations will be skipped");
    None
}

fn try_load(path: &Path) -> Option<Font<'static>> {
    let data = std::fs::read(path).ok()?;
    Font::try_from_vec(data)
}
