#![allow(clippy::unwrap_used, clippy::panic)]
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;

use crate::batch::ColumnArg;
use crate::time::{format_utc, parse_utc};
use crate::{
    get_position, get_position_batch, get_times, get_times_batch, get_times_with_height, Error,
    EventTime, EVENT_THRESHOLDS,
};

fn utc(s: &str) -> NaiveDateTime {
    parse_utc(s).unwrap()
}

/// Reference scenario shared by the golden tests: Kyiv, 2013-03-05.
const REF_DATE: &str = "2013-03-05T00:00:00Z";
const REF_LNG: f64 = 30.5;
const REF_LAT: f64 = 50.5;

/// Expected event times for the reference scenario at sea level.
const REF_TIMES: [(&str, &str); 14] = [
    ("solar_noon", "2013-03-05T10:10:57Z"),
    ("nadir", "2013-03-04T22:10:57Z"),
    ("sunrise", "2013-03-05T04:34:56Z"),
    ("sunset", "2013-03-05T15:46:57Z"),
    ("sunrise_end", "2013-03-05T04:38:19Z"),
    ("sunset_start", "2013-03-05T15:43:34Z"),
    ("dawn", "2013-03-05T04:02:17Z"),
    ("dusk", "2013-03-05T16:19:36Z"),
    ("nautical_dawn", "2013-03-05T03:24:31Z"),
    ("nautical_dusk", "2013-03-05T16:57:22Z"),
    ("night_end", "2013-03-05T02:46:17Z"),
    ("night", "2013-03-05T17:35:36Z"),
    ("golden_hour_end", "2013-03-05T05:19:01Z"),
    ("golden_hour", "2013-03-05T15:02:52Z"),
];

#[test]
fn position_matches_reference() {
    let pos = get_position(utc(REF_DATE), REF_LNG, REF_LAT);
    assert!((pos.azimuth - (-2.5003175907168385)).abs() < 1e-9, "azimuth {}", pos.azimuth);
    assert!((pos.altitude - (-0.7000406838781611)).abs() < 1e-9, "altitude {}", pos.altitude);
}

#[test]
fn times_match_reference() {
    let times = get_times(utc(REF_DATE), REF_LNG, REF_LAT).unwrap();
    for (key, expected) in REF_TIMES {
        let event = times.get(key).unwrap().time().unwrap();
        assert_eq!(format_utc(event), expected, "event {key}");
    }
}

#[test]
fn height_shifts_disc_events_only() {
    let times = get_times_with_height(utc(REF_DATE), REF_LNG, REF_LAT, 2000.0).unwrap();

    // A raised observer sees the solar disc earlier and longer.
    assert_eq!(format_utc(times.sunrise.time().unwrap()), "2013-03-05T04:25:07Z");
    assert_eq!(format_utc(times.sunset.time().unwrap()), "2013-03-05T15:56:46Z");

    // The transit pair and the twilight angles are height-independent.
    assert_eq!(format_utc(times.solar_noon), "2013-03-05T10:10:57Z");
    assert_eq!(format_utc(times.nadir), "2013-03-04T22:10:57Z");
    let sea_level = get_times(utc(REF_DATE), REF_LNG, REF_LAT).unwrap();
    assert_eq!(times.dawn, sea_level.dawn);
    assert_eq!(times.dusk, sea_level.dusk);
    assert_eq!(times.night_end, sea_level.night_end);
    assert_eq!(times.night, sea_level.night);
    assert_eq!(times.golden_hour_end, sea_level.golden_hour_end);
    assert_eq!(times.golden_hour, sea_level.golden_hour);
}

#[test]
fn polar_summer_keeps_transits_only() {
    // Svalbard at midsummer: the sun never drops below even the 6° golden
    // hour threshold, so every threshold event is a sentinel while the
    // transit pair stays defined.
    let times = get_times(utc("2013-06-21T00:00:00Z"), 15.0, 78.0).unwrap();

    for (key, event) in times.iter() {
        match key {
            "solar_noon" | "nadir" => assert!(event.is_defined(), "{key} must stay defined"),
            _ => assert_eq!(event, EventTime::AlwaysAbove, "{key}"),
        }
    }
    assert_eq!(format_utc(times.solar_noon).split('T').next(), Some("2013-06-21"));
}

#[test]
fn polar_winter_mixes_defined_and_undefined() {
    // Svalbard at midwinter: the sun peaks near -11.4°, so the disc and
    // civil events never occur while the nautical and astronomical
    // crossings still do. One sentinel key must not poison the others.
    let times = get_times(utc("2013-12-21T00:00:00Z"), 15.0, 78.0).unwrap();

    assert_eq!(times.sunrise, EventTime::AlwaysBelow);
    assert_eq!(times.sunset, EventTime::AlwaysBelow);
    assert_eq!(times.sunrise_end, EventTime::AlwaysBelow);
    assert_eq!(times.sunset_start, EventTime::AlwaysBelow);
    assert_eq!(times.dawn, EventTime::AlwaysBelow);
    assert_eq!(times.dusk, EventTime::AlwaysBelow);
    assert_eq!(times.golden_hour_end, EventTime::AlwaysBelow);
    assert_eq!(times.golden_hour, EventTime::AlwaysBelow);

    assert!(times.nautical_dawn.is_defined());
    assert!(times.nautical_dusk.is_defined());
    assert!(times.night_end.is_defined());
    assert!(times.night.is_defined());
    assert!(times.nautical_dawn.time().unwrap() < times.solar_noon);
    assert!(times.nautical_dusk.time().unwrap() > times.solar_noon);
}

#[test]
fn high_latitude_summer_returns_instead_of_failing() {
    // Calgary in late May: the sun bottoms out a fraction of a degree above
    // -18°, the case where a naive acos would take a domain error. The call
    // must succeed with sentinel night keys and defined disc events.
    let times = get_times(utc("2020-05-26T00:00:00Z"), -114.0719, 51.0447).unwrap();

    assert_eq!(times.night, EventTime::AlwaysAbove);
    assert_eq!(times.night_end, EventTime::AlwaysAbove);
    assert!(times.sunrise.is_defined());
    assert!(times.sunset.is_defined());
    assert!(times.nautical_dawn.is_defined());
}

#[test]
fn equator_equinox_day_is_near_twelve_hours() {
    let times = get_times(utc("2013-03-20T00:00:00Z"), 0.0, 0.0).unwrap();
    let day = times.sunset.time().unwrap() - times.sunrise.time().unwrap();
    let twelve_hours = TimeDelta::hours(12);
    assert!((day - twelve_hours).abs() < TimeDelta::minutes(10), "day length {day}");
}

#[test]
fn catalog_covers_all_paired_keys() {
    let times = get_times(utc(REF_DATE), REF_LNG, REF_LAT).unwrap();
    for threshold in &EVENT_THRESHOLDS {
        assert!(times.get(threshold.morning).is_some(), "{}", threshold.morning);
        assert!(times.get(threshold.evening).is_some(), "{}", threshold.evening);
    }
    assert_eq!(times.get("blue_hour"), None);
    assert_eq!(times.iter().count(), 14);
    for (key, event) in times.iter() {
        assert_eq!(times.get(key), Some(event), "{key}");
    }
}

#[test]
fn batch_rejects_mismatched_columns() {
    let lngs = [30.5, 30.5];
    let lats = [50.5, 50.5, 50.5];
    let err = get_position_batch(utc(REF_DATE), &lngs[..], &lats[..]).unwrap_err();
    assert_eq!(err, Error::ShapeMismatch { expected: 2, actual: 3 });
}

#[test]
fn batch_broadcasts_scalars_to_one_row() {
    let rows = get_position_batch(utc(REF_DATE), REF_LNG, REF_LAT).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], get_position(utc(REF_DATE), REF_LNG, REF_LAT));
}

/// UTC datetimes over a two-century window, at second resolution.
fn any_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1950i32..=2049, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, minute, second))
                .unwrap()
        },
    )
}

proptest! {
    #[test]
    fn iso_round_trip_is_exact(dt in any_datetime()) {
        let formatted = format_utc(dt);
        prop_assert_eq!(parse_utc(&formatted).unwrap(), dt);
    }

    #[test]
    fn noon_is_daily_maximum_and_nadir_minimum(
        dt in any_datetime(),
        lng in -180.0f64..=180.0,
        lat in -65.0f64..=65.0,
    ) {
        let times = get_times(dt, lng, lat).unwrap();
        let noon_alt = get_position(times.solar_noon, lng, lat).altitude;
        let nadir_alt = get_position(times.nadir, lng, lat).altitude;

        // The closed-form transit is good to well under a minute; sampling
        // on a one-hour grid leaves orders of magnitude more margin than
        // the tolerance here.
        for hours in 1..=12i64 {
            for t in [
                times.solar_noon + TimeDelta::hours(hours),
                times.solar_noon - TimeDelta::hours(hours),
            ] {
                prop_assert!(get_position(t, lng, lat).altitude <= noon_alt + 1e-4);
            }
            for t in [
                times.nadir + TimeDelta::hours(hours),
                times.nadir - TimeDelta::hours(hours),
            ] {
                prop_assert!(get_position(t, lng, lat).altitude >= nadir_alt - 1e-4);
            }
        }
    }

    #[test]
    fn raising_observer_never_shrinks_the_day(
        dt in any_datetime(),
        lng in -180.0f64..=180.0,
        lat in -55.0f64..=55.0,
        h1 in 0.0f64..=5000.0,
        h2 in 0.0f64..=5000.0,
    ) {
        let (low, high) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
        let at_low = get_times_with_height(dt, lng, lat, low).unwrap();
        let at_high = get_times_with_height(dt, lng, lat, high).unwrap();

        // Within ±55° the -0.833° threshold (even dipped by ~2.5° at
        // 5000 m) is crossed every day.
        let sunrise_low = at_low.sunrise.time().unwrap();
        let sunrise_high = at_high.sunrise.time().unwrap();
        let sunset_low = at_low.sunset.time().unwrap();
        let sunset_high = at_high.sunset.time().unwrap();

        prop_assert!(sunrise_high <= sunrise_low);
        prop_assert!(sunset_high >= sunset_low);
        prop_assert_eq!(at_low.solar_noon, at_high.solar_noon);
    }

    #[test]
    fn batch_rows_match_scalar_calls(
        dts in proptest::collection::vec(any_datetime(), 1..8),
        lng in -180.0f64..=180.0,
        lats in proptest::collection::vec(-80.0f64..=80.0, 1..8),
        height in 0.0f64..=3000.0,
    ) {
        // Align the two columns; lng and height stay scalar.
        let rows = dts.len().min(lats.len());
        let dts = &dts[..rows];
        let lats = &lats[..rows];

        let positions = get_position_batch(dts, lng, lats).unwrap();
        let times = get_times_batch(
            ColumnArg::Column(dts),
            ColumnArg::Scalar(lng),
            ColumnArg::Column(lats),
            ColumnArg::Scalar(height),
        )
        .unwrap();

        prop_assert_eq!(positions.len(), rows);
        prop_assert_eq!(times.len(), rows);
        for i in 0..rows {
            prop_assert_eq!(positions[i], get_position(dts[i], lng, lats[i]));
            prop_assert_eq!(
                times[i],
                get_times_with_height(dts[i], lng, lats[i], height).unwrap()
            );
        }
    }
}
