//! # suncalc
//!
//! Sun position and solar event times for a given UTC instant and
//! geographic location.
//!
//! The crate has two entry points plus batch variants of each:
//!
//! - [`get_position`] — apparent sun position (azimuth, altitude, radians)
//!   at an instant
//! - [`get_times`] / [`get_times_with_height`] — clock times of the named
//!   solar events (solar noon, nadir, sunrise/sunset, twilight and
//!   golden-hour boundaries) for the UTC day containing an instant
//!
//! All instants are [`chrono::NaiveDateTime`] values interpreted as UTC.
//! At high latitudes a threshold event may not occur on a given day; that
//! comes back as an [`EventTime`] sentinel, never as an error or a garbage
//! timestamp, and never disturbs the other keys of the same day.
//!
//! ## Basic usage
//!
//! ```
//! use suncalc::{get_position, get_times, time::format_utc};
//! use chrono::NaiveDateTime;
//!
//! let date = NaiveDateTime::parse_from_str("2013-03-05 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
//!
//! // Kyiv: 30.5°E, 50.5°N
//! let pos = get_position(date, 30.5, 50.5);
//! println!("azimuth: {:.4} rad, altitude: {:.4} rad", pos.azimuth, pos.altitude);
//!
//! let times = get_times(date, 30.5, 50.5).unwrap();
//! println!("solar noon: {}", format_utc(times.solar_noon));
//! if let Some(sunrise) = times.sunrise.time() {
//!     println!("sunrise: {}", format_utc(sunrise));
//! }
//! ```

pub mod batch;
mod ephemeris;
mod events;
pub mod time;

#[cfg(test)]
mod tests;

use chrono::NaiveDateTime;
use thiserror::Error as ThisError;

pub use batch::{get_position_batch, get_times_batch, ColumnArg};
pub use ephemeris::SunPosition;
pub use events::{EventThreshold, EventTime, SunTimes, EVENT_THRESHOLDS};

/// Errors reported by the time conversions and the batch layer.
///
/// A day without a particular solar event is not an error; see
/// [`EventTime`].
#[derive(ThisError, Clone, Debug, PartialEq)]
pub enum Error {
    /// A computed instant falls outside the representable calendar range
    #[error("instant out of representable calendar range")]
    TimeOutOfRange,

    /// An input string could not be parsed as a timestamp
    #[error("malformed timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Batch columns have inconsistent lengths
    #[error("batch columns have mismatched lengths: {expected} vs {actual}")]
    ShapeMismatch {
        /// Length of the first non-scalar column
        expected: usize,
        /// Conflicting length of a later column
        actual: usize,
    },
}

/// Apparent position of the sun at `date` (UTC) for an observer at
/// longitude `lng` and latitude `lat`, both in degrees.
///
/// Azimuth is measured clockwise from south and altitude up from the
/// horizon plane, both in radians. The computation is a pure function with
/// no error path: any finite input yields a finite position, meaningful or
/// not.
///
/// # Example
///
/// ```
/// let date = suncalc::time::parse_utc("2013-03-05T00:00:00Z").unwrap();
/// let pos = suncalc::get_position(date, 30.5, 50.5);
/// assert!((pos.altitude - (-0.7000406838781611)).abs() < 1e-9);
/// ```
pub fn get_position(date: NaiveDateTime, lng: f64, lat: f64) -> SunPosition {
    ephemeris::sun_position(date, lng, lat)
}

/// Solar event times for the UTC day containing `date`, for an observer at
/// sea level at longitude `lng` and latitude `lat` (degrees).
///
/// Equivalent to [`get_times_with_height`] with a height of zero.
///
/// # Errors
///
/// Returns [`Error::TimeOutOfRange`] when the day's events fall outside the
/// representable calendar range.
pub fn get_times(date: NaiveDateTime, lng: f64, lat: f64) -> Result<SunTimes, Error> {
    events::sun_times(date, lng, lat, 0.0)
}

/// Solar event times for the UTC day containing `date`, for an observer
/// `height` meters above the local horizon.
///
/// The height only affects the catalog entries flagged as height-corrected
/// (the solar-disc events around sunrise and sunset): the horizon dips by
/// roughly `2.076·√height / 60` degrees, so a raised observer sees the sun
/// rise earlier and set later. Twilight and golden-hour angles are
/// unaffected, as is the transit pair.
///
/// # Errors
///
/// Returns [`Error::TimeOutOfRange`] when the day's events fall outside the
/// representable calendar range.
pub fn get_times_with_height(
    date: NaiveDateTime,
    lng: f64,
    lat: f64,
    height: f64,
) -> Result<SunTimes, Error> {
    events::sun_times(date, lng, lat, height)
}
