//! Map rendering for tropical cyclone tracks.
//!
//! Draws a base map (coastlines, borders, graticule), then per observation:
//! wind-radii rings, a point marker, and a leader-line annotation with
//! time, wind, and pressure. Output is a single raster image.

pub mod annotate;
pub mod basemap;
pub mod config;
pub mod draw;
pub mod error;
pub mod font;
pub mod frame;
pub mod plot;
pub mod radii;

pub use config::{BasemapConfig, PlotConfig};
pub use error::{RenderError, RenderResult};
pub use frame::MapFrame;
pub use plot::{plot_track, save_png, show};
