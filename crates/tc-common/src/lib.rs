//! Common types shared across the tc-track crates.

pub mod bbox;
pub mod style;
pub mod time;

pub use bbox::BoundingBox;
pub use style::{Color, ColorParseError};
pub use time::{parse_iso_time, year_window, TimeParseError};
