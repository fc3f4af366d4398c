//! Low-precision solar ephemeris.
//!
//! Computes the sun's equatorial coordinates and its horizontal position for
//! an observer, using linear mean-element approximations plus an
//! equation-of-center term. Accurate to roughly one arcminute over a
//! multi-century range, which is ample for rise/set and twilight work.
//!
//! Every function here is a pure function of its inputs: no iteration, no
//! state, no error paths. Finite inputs always produce finite outputs, even
//! when the latitude or longitude is outside its physical range (the result
//! is then simply meaningless).

use core::f64::consts::PI;

use chrono::NaiveDateTime;

use crate::time::to_days;

// ============================================================================
// Constants
// ============================================================================

/// Obliquity of the ecliptic (Earth's axial tilt) in radians.
const OBLIQUITY: f64 = PI / 180.0 * 23.4397;

/// Mean anomaly at the J2000.0 epoch, degrees.
const MEAN_ANOMALY_EPOCH: f64 = 357.5291;

/// Mean anomaly rate, degrees per day.
const MEAN_ANOMALY_RATE: f64 = 0.985_600_28;

/// Argument of perihelion of the Earth, degrees.
const PERIHELION: f64 = 102.9372;

/// Greenwich sidereal time at the J2000.0 epoch, degrees.
const SIDEREAL_EPOCH: f64 = 280.16;

/// Sidereal rotation rate, degrees per day.
const SIDEREAL_RATE: f64 = 360.985_623_5;

// ============================================================================
// Types
// ============================================================================

/// Horizontal position of the sun as seen by an observer.
///
/// # Fields
///
/// - `azimuth`: radians, measured clockwise from south (0 = S, π/2 = W)
/// - `altitude`: radians above the horizon plane, positive up
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SunPosition {
    /// Azimuth in radians, clockwise from south
    pub azimuth: f64,
    /// Altitude above the horizon in radians
    pub altitude: f64,
}

/// Equatorial coordinates of the sun (intermediate, not user-facing).
#[derive(Copy, Clone, Debug)]
pub(crate) struct EquatorialCoords {
    /// Right ascension in radians
    pub(crate) right_ascension: f64,
    /// Declination in radians
    pub(crate) declination: f64,
}

// ============================================================================
// Solar mean elements
// ============================================================================

/// Solar mean anomaly in radians, `d` days after J2000.0.
pub(crate) fn solar_mean_anomaly(d: f64) -> f64 {
    (MEAN_ANOMALY_EPOCH + MEAN_ANOMALY_RATE * d).to_radians()
}

/// Ecliptic longitude of the sun in radians for mean anomaly `m`.
///
/// Adds the equation of center (first three sine harmonics of `m`) and the
/// perihelion constant; the trailing π moves from the sun-centered to the
/// Earth-centered direction.
pub(crate) fn ecliptic_longitude(m: f64) -> f64 {
    let center =
        (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    m + center + PERIHELION.to_radians() + PI
}

/// Declination for ecliptic longitude `l` and latitude `b`, radians.
pub(crate) fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Right ascension for ecliptic longitude `l` and latitude `b`, radians.
pub(crate) fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

/// Equatorial coordinates of the sun `d` days after J2000.0.
///
/// The sun's ecliptic latitude never exceeds a few arcseconds, so it is
/// taken as zero.
pub(crate) fn sun_coords(d: f64) -> EquatorialCoords {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    EquatorialCoords {
        right_ascension: right_ascension(l, 0.0),
        declination: declination(l, 0.0),
    }
}

// ============================================================================
// Horizontal projection
// ============================================================================

/// Local sidereal time in radians, `d` days after J2000.0 at west longitude
/// `lw` (radians).
pub(crate) fn sidereal_time(d: f64, lw: f64) -> f64 {
    (SIDEREAL_EPOCH + SIDEREAL_RATE * d).to_radians() - lw
}

/// Azimuth (radians, clockwise from south) for hour angle `h`, observer
/// latitude `phi` and declination `dec`.
pub(crate) fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

/// Altitude above the horizon (radians) for hour angle `h`, observer
/// latitude `phi` and declination `dec`.
pub(crate) fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Horizontal position of the sun at `date` for an observer at
/// `lng`/`lat` degrees.
pub(crate) fn sun_position(date: NaiveDateTime, lng: f64, lat: f64) -> SunPosition {
    let lw = (-lng).to_radians();
    let phi = lat.to_radians();
    let d = to_days(date);

    let coords = sun_coords(d);
    let h = sidereal_time(d, lw) - coords.right_ascension;

    SunPosition {
        azimuth: azimuth(h, phi, coords.declination),
        altitude: altitude(h, phi, coords.declination),
    }
}
