//! Tropical cyclone track plotter.
//!
//! Loads one named storm's best-track rows from an IBTrACS-style CSV
//! archive and renders the track, wind-radii rings, and annotations to a
//! PNG map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ibtracs::{load_track, Agency, LoadOptions};
use tc_common::Color;
use track_render::{plot_track, save_png, show, PlotConfig};

#[derive(Parser, Debug)]
#[command(name = "tc-plot")]
#[command(about = "Plot a tropical cyclone track from an IBTrACS CSV archive")]
struct Args {
    /// Storm name as it appears in the archive (matched case-sensitively
    /// after uppercasing, e.g. "IDA")
    #[arg(short, long)]
    name: String,

    /// Calendar year of the storm's observations
    #[arg(short, long)]
    year: i32,

    /// IBTrACS CSV archive path
    #[arg(short, long, default_value = "ibtracs.ALL.list.v04r00.csv")]
    archive: PathBuf,

    /// Output image path (default: <NAME>_<YEAR>_track.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the rendered plot in the system image viewer instead of
    /// writing the output file
    #[arg(long)]
    show: bool,

    /// Keep rows with a missing official wind speed
    #[arg(long)]
    no_filter_wmo: bool,

    /// Agency whose wind-radii columns to draw: usa, reunion, or bom
    #[arg(long, default_value = "usa")]
    agency: Agency,

    /// Degrees of padding around the track bounding box
    #[arg(long, default_value = "10.0")]
    map_offset: f64,

    /// Divisor converting wind radii (nautical miles) to plot degrees
    #[arg(long, default_value = "70.0")]
    radius_scale: f64,

    /// Raster resolution in pixels per degree
    #[arg(long, default_value = "24.0")]
    pixels_per_degree: f64,

    /// Ring color for the 34-knot threshold (name or #rrggbb)
    #[arg(long, default_value = "crimson")]
    color_r34: Color,

    /// Ring color for the 50-knot threshold
    #[arg(long, default_value = "blue")]
    color_r50: Color,

    /// Ring color for the 64-knot threshold
    #[arg(long, default_value = "green")]
    color_r64: Color,

    /// Coastline GeoJSON overlay
    #[arg(long)]
    coastlines: Option<PathBuf>,

    /// Political border GeoJSON overlay
    #[arg(long)]
    borders: Option<PathBuf>,

    /// TrueType font for labels (default: first usable system font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let storm_name = args.name.to_uppercase();
    let options = LoadOptions {
        filter_missing_wmo: !args.no_filter_wmo,
    };

    info!(storm = %storm_name, year = args.year, archive = %args.archive.display(), "loading track");
    let track = load_track(&args.archive, &storm_name, args.year, &options)
        .with_context(|| format!("loading {}", args.archive.display()))?;

    if track.is_empty() {
        warn!(
            storm = %storm_name,
            year = args.year,
            "no observations matched; the output will be a blank map"
        );
    } else {
        info!(points = track.len(), "track loaded");
    }

    let config = PlotConfig {
        color_r34: args.color_r34,
        color_r50: args.color_r50,
        color_r64: args.color_r64,
        map_offset: args.map_offset,
        radius_scale: args.radius_scale,
        pixels_per_degree: args.pixels_per_degree,
        agency: args.agency,
        font_path: args.font,
        basemap: track_render::BasemapConfig {
            coastlines: args.coastlines,
            borders: args.borders,
        },
        ..PlotConfig::default()
    };

    let img = plot_track(&track, &config)?;

    if args.show {
        show(&img)?;
    } else {
        let output = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}_{}_track.png", storm_name, args.year)));
        save_png(&img, &output)?;
        println!("Wrote {}", output.display());
    }

    Ok(())
}
