//! Integration tests for archive loading against small on-disk fixtures.

use std::collections::HashMap;
use std::io::Write;

use ibtracs::{load_track, LoadError, LoadOptions};
use tempfile::NamedTempFile;

/// Full extracted column set plus a couple of extra archive columns that the
/// loader must ignore.
fn header_columns() -> Vec<String> {
    let mut cols = vec![
        "SID", "SEASON", "NAME", "ISO_TIME", "WMO_WIND", "WMO_PRES", "LAT", "LON",
    ]
    .into_iter()
    .map(String::from)
    .collect::<Vec<_>>();

    for agency in ["USA", "REUNION", "BOM"] {
        for threshold in [34, 50, 64] {
            for quadrant in ["NE", "SE", "SW", "NW"] {
                cols.push(format!("{agency}_R{threshold}_{quadrant}"));
            }
        }
    }
    cols
}

/// Write a fixture archive: header row, units row, then the given rows.
/// Each row is a map of column name to value; unlisted columns are blank.
fn write_archive(rows: &[HashMap<&str, &str>]) -> NamedTempFile {
    let cols = header_columns();
    let mut file = NamedTempFile::new().expect("create temp archive");

    writeln!(file, "{}", cols.join(",")).unwrap();
    // Units row, as IBTrACS writes it.
    let units: Vec<&str> = cols
        .iter()
        .map(|c| match c.as_str() {
            "ISO_TIME" => " ",
            "WMO_WIND" => "kts",
            "WMO_PRES" => "mb",
            "LAT" => "degrees_north",
            "LON" => "degrees_east",
            c if c.contains("_R") => "nmile",
            _ => " ",
        })
        .collect();
    writeln!(file, "{}", units.join(",")).unwrap();

    for row in rows {
        let values: Vec<&str> = cols.iter().map(|c| *row.get(c.as_str()).unwrap_or(&"")).collect();
        writeln!(file, "{}", values.join(",")).unwrap();
    }
    file.flush().unwrap();
    file
}

fn base_row<'a>() -> HashMap<&'a str, &'a str> {
    HashMap::from([
        ("SID", "2020123N20320"),
        ("SEASON", "2020"),
        ("NAME", "TESTSTORM"),
        ("ISO_TIME", "2020-08-18 12:00:00"),
        ("WMO_WIND", "50"),
        ("WMO_PRES", "980"),
        ("LAT", "20.0"),
        ("LON", "-40.0"),
        ("USA_R34_SE", "50"),
        ("USA_R34_NE", "60"),
        ("USA_R34_SW", "40"),
        ("USA_R34_NW", "55"),
    ])
}

#[test]
fn test_single_row_round_trip() {
    let archive = write_archive(&[base_row()]);
    let track = load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();

    assert_eq!(track.len(), 1);
    let p = &track.points[0];
    assert_eq!(p.lon_180, -40.0);
    assert_eq!(p.lon, 320.0);
    assert_eq!(p.lat, 20.0);
    assert_eq!(p.wmo_wind, Some(50.0));
    assert_eq!(p.wmo_pres, Some(980.0));
    assert_eq!(p.usa.r34.complete(), Some([50.0, 60.0, 40.0, 55.0]));
    assert_eq!(p.usa.r50.complete(), None);
}

#[test]
fn test_units_row_is_skipped() {
    // The units row has a blank NAME field and could never match, but a
    // units row that said TESTSTORM would be row data; make sure the first
    // record is dropped unconditionally.
    let mut decoy = base_row();
    decoy.insert("ISO_TIME", "2020-08-18 18:00:00");
    let archive = write_archive(&[decoy]);

    let track = load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();
    assert_eq!(track.len(), 1);
}

#[test]
fn test_no_match_returns_empty_track() {
    let archive = write_archive(&[base_row()]);

    let track = load_track(archive.path(), "NOSUCHSTORM", 2020, &LoadOptions::default()).unwrap();
    assert!(track.is_empty());
    assert_eq!(track.name, "NOSUCHSTORM");

    // Wrong year, same name.
    let track = load_track(archive.path(), "TESTSTORM", 2019, &LoadOptions::default()).unwrap();
    assert!(track.is_empty());
}

#[test]
fn test_name_match_is_case_sensitive() {
    let archive = write_archive(&[base_row()]);
    let track = load_track(archive.path(), "TestStorm", 2020, &LoadOptions::default()).unwrap();
    assert!(track.is_empty());
}

#[test]
fn test_year_window_is_half_open() {
    let mut last_of_2020 = base_row();
    last_of_2020.insert("ISO_TIME", "2020-12-31 23:59:59");
    let mut first_of_2021 = base_row();
    first_of_2021.insert("ISO_TIME", "2021-01-01 00:00:00");
    let archive = write_archive(&[last_of_2020, first_of_2021]);

    let track = load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();
    assert_eq!(track.len(), 1);

    let track = load_track(archive.path(), "TESTSTORM", 2021, &LoadOptions::default()).unwrap();
    assert_eq!(track.len(), 1);
}

#[test]
fn test_wmo_filter_drops_blank_rows() {
    let mut blank_wind = base_row();
    blank_wind.insert("WMO_WIND", " ");
    blank_wind.insert("ISO_TIME", "2020-08-18 18:00:00");
    let archive = write_archive(&[base_row(), blank_wind]);

    let filtered =
        load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();
    assert_eq!(filtered.len(), 1);

    let unfiltered = load_track(
        archive.path(),
        "TESTSTORM",
        2020,
        &LoadOptions {
            filter_missing_wmo: false,
        },
    )
    .unwrap();
    assert_eq!(unfiltered.len(), 2);
    assert_eq!(unfiltered.points[1].wmo_wind, None);
}

#[test]
fn test_blank_quadrant_is_missing_not_error() {
    let mut row = base_row();
    row.insert("USA_R34_SW", " ");
    let archive = write_archive(&[row]);

    let track = load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();
    let radii = &track.points[0].usa.r34;
    assert_eq!(radii.sw, None);
    assert_eq!(radii.ne, Some(60.0));
    // An incomplete ring is not drawable.
    assert_eq!(radii.complete(), None);
}

#[test]
fn test_rows_keep_archive_order() {
    let mut second = base_row();
    second.insert("ISO_TIME", "2020-08-18 18:00:00");
    let mut third = base_row();
    third.insert("ISO_TIME", "2020-08-19 00:00:00");
    let archive = write_archive(&[base_row(), second, third]);

    let track = load_track(archive.path(), "TESTSTORM", 2020, &LoadOptions::default()).unwrap();
    assert_eq!(track.len(), 3);
    assert!(track.points.windows(2).all(|w| w[0].time <= w[1].time));
}

#[test]
fn test_missing_required_column_is_fatal() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "NAME,ISO_TIME,LAT,LON").unwrap();
    writeln!(file, " , , , ").unwrap();
    file.flush().unwrap();

    let err = load_track(file.path(), "X", 2020, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(_)));
}

#[test]
fn test_unreadable_archive_is_fatal() {
    let err = load_track(
        std::path::Path::new("/definitely/not/here.csv"),
        "X",
        2020,
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
