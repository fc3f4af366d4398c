//! Conversions between calendar instants and the continuous day count the
//! ephemeris works in.
//!
//! Internally every instant is a Julian day number (`f64`, fractional part
//! encoding time of day) and the ephemeris measures days since the J2000.0
//! epoch. Calendar instants are [`NaiveDateTime`] values interpreted as UTC,
//! carried at millisecond resolution so that formatting to whole seconds is
//! exact.

use chrono::{DateTime, NaiveDateTime};

use crate::Error;

/// Julian day number of the start of the Unix epoch day, rounded up
/// (1970-01-01T00:00:00Z is JD 2440587.5).
pub(crate) const J1970: f64 = 2_440_588.0;

/// Julian day number of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub(crate) const J2000: f64 = 2_451_545.0;

/// Milliseconds per day.
const DAY_MS: f64 = 86_400_000.0;

/// Convert a UTC instant to a Julian day number.
pub(crate) fn to_julian(date: NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

/// Convert a Julian day number back to a UTC instant.
///
/// Sub-millisecond fractions are truncated, so a round trip through
/// [`to_julian`] is exact at millisecond resolution.
///
/// # Errors
///
/// Returns [`Error::TimeOutOfRange`] when the day number is not finite or
/// falls outside the range representable by [`NaiveDateTime`].
pub(crate) fn from_julian(julian_day: f64) -> Result<NaiveDateTime, Error> {
    let millis = (julian_day + 0.5 - J1970) * DAY_MS;
    if !millis.is_finite() {
        return Err(Error::TimeOutOfRange);
    }
    DateTime::from_timestamp_millis(millis.floor() as i64)
        .map(|dt| dt.naive_utc())
        .ok_or(Error::TimeOutOfRange)
}

/// Days (including fraction) since the J2000.0 epoch.
pub(crate) fn to_days(date: NaiveDateTime) -> f64 {
    to_julian(date) - J2000
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp into a UTC instant.
///
/// # Errors
///
/// Returns [`Error::Timestamp`] when the string does not match the format.
///
/// # Example
///
/// ```
/// let dt = suncalc::time::parse_utc("2013-03-05T00:00:00Z").unwrap();
/// assert_eq!(suncalc::time::format_utc(dt), "2013-03-05T00:00:00Z");
/// ```
pub fn parse_utc(s: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ").map_err(Error::Timestamp)
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`, truncating sub-second
/// fractions.
pub fn format_utc(date: NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
