//! Solar event times for a calendar day.
//!
//! Solves, for each altitude threshold in the catalog, the two instants at
//! which the sun crosses that threshold on the UTC day of the input instant.
//! Solar noon is found in closed form from the mean elements evaluated at
//! the approximate transit, and every other event is an analytic hour-angle
//! inversion about that noon; nothing iterates.
//!
//! At high latitudes a threshold may never be crossed on a given day. That
//! is a first-class result ([`EventTime::AlwaysAbove`] /
//! [`EventTime::AlwaysBelow`]), not an error, and it never affects the other
//! keys of the same day: solar noon, nadir and any threshold the sun does
//! cross stay defined.

use core::f64::consts::PI;

use chrono::NaiveDateTime;

use crate::ephemeris::{declination, ecliptic_longitude, solar_mean_anomaly};
use crate::time::{from_julian, to_days, J2000};
use crate::Error;

// ============================================================================
// Constants
// ============================================================================

/// Baseline offset of the solar transit within a Julian cycle, days.
const J0: f64 = 0.0009;

/// Tolerance for the hour-angle cosine leaving [-1, 1] through floating
/// point rounding alone. Values within this band are clamped; anything
/// beyond it is a genuine no-crossing day.
const COS_EPSILON: f64 = 1e-9;

/// Horizon dip coefficient for observer height, degrees per √meter
/// (terrestrial refraction-dip approximation), divided by 60 at use.
const DIP_COEFFICIENT: f64 = -2.076;

// ============================================================================
// Threshold catalog
// ============================================================================

/// One entry of the fixed altitude-threshold catalog.
///
/// Each threshold is crossed twice on an ordinary day; `morning` and
/// `evening` name the rising and setting crossing. `height_corrected`
/// entries have the observer's horizon-dip angle added to the threshold
/// before solving, so that raising the observer widens the above-horizon
/// window for the solar disc events while leaving the twilight angles
/// untouched.
#[derive(Copy, Clone, Debug)]
pub struct EventThreshold {
    /// Sun altitude at the crossing, degrees relative to the horizon
    pub altitude_deg: f64,
    /// Key of the morning (rising) event
    pub morning: &'static str,
    /// Key of the evening (setting) event
    pub evening: &'static str,
    /// Whether the observer-height dip angle applies to this threshold
    pub height_corrected: bool,
}

/// The fixed catalog of altitude thresholds, in the order the paired fields
/// of [`SunTimes`] are laid out.
pub static EVENT_THRESHOLDS: [EventThreshold; 6] = [
    EventThreshold { altitude_deg: -0.833, morning: "sunrise", evening: "sunset", height_corrected: true },
    EventThreshold { altitude_deg: -0.3, morning: "sunrise_end", evening: "sunset_start", height_corrected: true },
    EventThreshold { altitude_deg: -6.0, morning: "dawn", evening: "dusk", height_corrected: false },
    EventThreshold { altitude_deg: -12.0, morning: "nautical_dawn", evening: "nautical_dusk", height_corrected: false },
    EventThreshold { altitude_deg: -18.0, morning: "night_end", evening: "night", height_corrected: false },
    EventThreshold { altitude_deg: 6.0, morning: "golden_hour_end", evening: "golden_hour", height_corrected: false },
];

// ============================================================================
// Result types
// ============================================================================

/// Result of solving one solar event for one day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventTime {
    /// The sun crosses the threshold at the given UTC instant
    At(NaiveDateTime),
    /// The sun stays above the threshold all day (e.g. midnight sun)
    AlwaysAbove,
    /// The sun stays below the threshold all day (e.g. polar night)
    AlwaysBelow,
}

impl EventTime {
    /// The crossing instant, or `None` when the sun never crosses the
    /// threshold that day.
    pub fn time(self) -> Option<NaiveDateTime> {
        match self {
            EventTime::At(t) => Some(t),
            _ => None,
        }
    }

    /// Whether a crossing exists.
    pub fn is_defined(&self) -> bool {
        matches!(self, EventTime::At(_))
    }
}

/// Named solar event times for one UTC day.
///
/// `solar_noon` and `nadir` are always defined; the twelve threshold events
/// are [`EventTime`] values that may report a no-crossing day independently
/// of one another.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SunTimes {
    /// Meridian transit, the day's altitude maximum
    pub solar_noon: NaiveDateTime,
    /// Anti-transit, the day's altitude minimum
    pub nadir: NaiveDateTime,
    /// Top of the solar disc reaches the horizon (-0.833°)
    pub sunrise: EventTime,
    /// Bottom of the solar disc touches the horizon (-0.833°)
    pub sunset: EventTime,
    /// Bottom of the solar disc clears the horizon (-0.3°)
    pub sunrise_end: EventTime,
    /// Bottom of the solar disc touches the horizon again (-0.3°)
    pub sunset_start: EventTime,
    /// Morning civil twilight starts (-6°)
    pub dawn: EventTime,
    /// Evening civil twilight ends (-6°)
    pub dusk: EventTime,
    /// Morning nautical twilight starts (-12°)
    pub nautical_dawn: EventTime,
    /// Evening nautical twilight ends (-12°)
    pub nautical_dusk: EventTime,
    /// Astronomical night ends (-18°)
    pub night_end: EventTime,
    /// Astronomical night starts (-18°)
    pub night: EventTime,
    /// Morning golden hour ends (6°)
    pub golden_hour_end: EventTime,
    /// Evening golden hour starts (6°)
    pub golden_hour: EventTime,
}

impl SunTimes {
    /// Look up an event by its key. Returns `None` for an unknown key;
    /// `solar_noon` and `nadir` come back as [`EventTime::At`].
    pub fn get(&self, key: &str) -> Option<EventTime> {
        let event = match key {
            "solar_noon" => EventTime::At(self.solar_noon),
            "nadir" => EventTime::At(self.nadir),
            "sunrise" => self.sunrise,
            "sunset" => self.sunset,
            "sunrise_end" => self.sunrise_end,
            "sunset_start" => self.sunset_start,
            "dawn" => self.dawn,
            "dusk" => self.dusk,
            "nautical_dawn" => self.nautical_dawn,
            "nautical_dusk" => self.nautical_dusk,
            "night_end" => self.night_end,
            "night" => self.night,
            "golden_hour_end" => self.golden_hour_end,
            "golden_hour" => self.golden_hour,
            _ => return None,
        };
        Some(event)
    }

    /// Iterate over all fourteen `(key, event)` pairs, transit events first,
    /// then the threshold pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, EventTime)> {
        [
            ("solar_noon", EventTime::At(self.solar_noon)),
            ("nadir", EventTime::At(self.nadir)),
            ("sunrise", self.sunrise),
            ("sunset", self.sunset),
            ("sunrise_end", self.sunrise_end),
            ("sunset_start", self.sunset_start),
            ("dawn", self.dawn),
            ("dusk", self.dusk),
            ("nautical_dawn", self.nautical_dawn),
            ("nautical_dusk", self.nautical_dusk),
            ("night_end", self.night_end),
            ("night", self.night),
            ("golden_hour_end", self.golden_hour_end),
            ("golden_hour", self.golden_hour),
        ]
        .into_iter()
    }
}

// ============================================================================
// Transit and hour-angle solving
// ============================================================================

/// Number of the Julian cycle (local solar day) containing day count `d`
/// at west longitude `lw`.
fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

/// Approximate transit for hour angle `ht` in cycle `n`, as days after
/// J2000.0.
fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

/// Refine an approximate transit `ds` into a Julian day, correcting for the
/// equation of time via mean anomaly `m` and ecliptic longitude `l`.
fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour-angle inversion outcome for one threshold.
enum Crossing {
    /// Hour angle (radians from local noon) at which the altitude equals
    /// the threshold
    At(f64),
    AlwaysAbove,
    AlwaysBelow,
}

/// Hour angle at which the sun's altitude equals `h0` for observer latitude
/// `phi` and noon declination `dec`.
///
/// A cosine outside [-1, 1] means the altitude never reaches the threshold
/// that day. Overshoot within [`COS_EPSILON`] is rounding noise at a grazing
/// geometry and is clamped instead of being reported as a no-crossing day.
/// A non-finite cosine (latitude at a pole) also maps to a no-crossing
/// result rather than propagating NaN into a timestamp.
fn hour_angle(h0: f64, phi: f64, dec: f64) -> Crossing {
    let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !(-1.0 - COS_EPSILON..=1.0 + COS_EPSILON).contains(&cos_h) {
        // NaN fails the range test and lands in AlwaysBelow, keeping the
        // result a sentinel instead of a garbage instant.
        if cos_h < -1.0 {
            return Crossing::AlwaysAbove;
        }
        return Crossing::AlwaysBelow;
    }
    Crossing::At(cos_h.clamp(-1.0, 1.0).acos())
}

/// Altitude adjustment for an observer `height` meters above the local
/// horizon, degrees.
fn observer_angle(height: f64) -> f64 {
    DIP_COEFFICIENT * height.sqrt() / 60.0
}

/// Solve all catalog events for the UTC day containing `date`.
///
/// The declination is evaluated once, at solar noon, and reused for every
/// threshold of the day; within-day declination drift is below the accuracy
/// of the ephemeris.
pub(crate) fn sun_times(
    date: NaiveDateTime,
    lng: f64,
    lat: f64,
    height: f64,
) -> Result<SunTimes, Error> {
    let lw = (-lng).to_radians();
    let phi = lat.to_radians();
    let dip = observer_angle(height);

    let d = to_days(date);
    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);

    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);

    let j_noon = solar_transit_j(ds, m, l);
    let solar_noon = from_julian(j_noon)?;
    let nadir = from_julian(j_noon - 0.5)?;

    let mut pairs = [(EventTime::AlwaysBelow, EventTime::AlwaysBelow); 6];
    for (slot, threshold) in pairs.iter_mut().zip(EVENT_THRESHOLDS.iter()) {
        let mut angle = threshold.altitude_deg;
        if threshold.height_corrected {
            angle += dip;
        }
        *slot = match hour_angle(angle.to_radians(), phi, dec) {
            Crossing::At(w) => {
                let j_set = solar_transit_j(approx_transit(w, lw, n), m, l);
                // The morning crossing mirrors the evening one about noon.
                let j_rise = j_noon - (j_set - j_noon);
                (
                    EventTime::At(from_julian(j_rise)?),
                    EventTime::At(from_julian(j_set)?),
                )
            }
            Crossing::AlwaysAbove => (EventTime::AlwaysAbove, EventTime::AlwaysAbove),
            Crossing::AlwaysBelow => (EventTime::AlwaysBelow, EventTime::AlwaysBelow),
        };
    }
    let [(sunrise, sunset), (sunrise_end, sunset_start), (dawn, dusk), (nautical_dawn, nautical_dusk), (night_end, night), (golden_hour_end, golden_hour)] =
        pairs;

    Ok(SunTimes {
        solar_noon,
        nadir,
        sunrise,
        sunset,
        sunrise_end,
        sunset_start,
        dawn,
        dusk,
        nautical_dawn,
        nautical_dusk,
        night_end,
        night,
        golden_hour_end,
        golden_hour,
    })
}
