//! Timestamp handling for IBTrACS observation times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse an IBTrACS `ISO_TIME` value into a UTC datetime.
///
/// The archive writes `YYYY-MM-DD HH:MM:SS`; the `T`-separated ISO form and
/// a bare date are also accepted.
pub fn parse_iso_time(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = nd.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// The half-open UTC window `[year-01-01T00:00, (year+1)-01-01T00:00)`.
pub fn year_window(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), TimeParseError> {
    let start_of = |y: i32| -> Option<DateTime<Utc>> {
        let ndt = NaiveDate::from_ymd_opt(y, 1, 1)?.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&ndt))
    };

    match (start_of(year), start_of(year + 1)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(TimeParseError::InvalidYear(year)),
    }
}

/// Time parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("invalid timestamp format: {0}")]
    InvalidFormat(String),

    #[error("year {0} is out of range")]
    InvalidYear(i32),
}
