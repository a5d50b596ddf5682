//! Property-based tests for solar schedules using proptest.
//!
//! These verify invariants that should hold for *any* non-polar input, not
//! just the almanac vectors in `solar_tests.rs`.

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;
use proptest::prelude::*;
use solar_cron::{times, Event, Schedule, SolarSchedule};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Sunrise),
        Just(Event::Noon),
        Just(Event::Sunset),
    ]
}

/// Latitudes safely inside the polar circles so the hour angle stays real.
fn arb_latitude() -> impl Strategy<Value = f64> {
    -55.0..55.0
}

fn arb_longitude() -> impl Strategy<Value = f64> {
    -180.0..180.0
}

fn arb_timezone() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("UTC".to_string()),
        Just("America/New_York".to_string()),
        Just("Europe/Paris".to_string()),
        Just("Australia/Adelaide".to_string()),
        Just("Asia/Tokyo".to_string()),
    ]
}

/// (timezone, lat, lon) triples where the coordinates actually lie in the
/// timezone, for properties sensitive to clock/solar alignment.
fn arb_city() -> impl Strategy<Value = (&'static str, f64, f64)> {
    prop_oneof![
        Just(("Europe/Paris", 48.856614, 2.3522219)),
        Just(("America/New_York", 40.6976637, -74.119764)),
        Just(("Australia/Adelaide", -35.2163355, 138.4751278)),
        Just(("Asia/Tokyo", 35.6762, 139.6503)),
    ]
}

/// Date/time components in the 2020-2027 range. Day is capped at 28 to
/// avoid invalid month/day combos.
fn arb_instant() -> impl Strategy<Value = (i32, u32, u32, u32, u32)> {
    (2020i32..=2027, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn local(tz: &str, ymdhm: (i32, u32, u32, u32, u32)) -> Option<DateTime<Tz>> {
    let tz: Tz = tz.parse().expect("known timezone");
    let (y, mo, d, h, mi) = ymdhm;
    tz.with_ymd_and_hms(y, mo, d, h, mi, 0).single()
}

// ---------------------------------------------------------------------------
// Property 1: next is strictly after the query time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn next_is_strictly_after_query(
        event in arb_event(),
        lat in arb_latitude(),
        lon in arb_longitude(),
        tz in arb_timezone(),
        instant in arb_instant(),
    ) {
        let Some(t) = local(&tz, instant) else { return Ok(()) };
        let schedule = SolarSchedule::new(event, Duration::zero(), lat, lon, t.timezone());
        if let Some(next) = schedule.next(&t) {
            prop_assert!(next > t, "next {next} not after {t}");
        }
        // None is only legitimate for polar degeneracy, excluded by the
        // latitude range.
        prop_assert!(schedule.next(&t).is_some());
    }
}

// ---------------------------------------------------------------------------
// Property 2: rise < noon < set on any non-polar day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn rise_noon_set_are_ordered(
        lat in arb_latitude(),
        lon in arb_longitude(),
        tz in arb_timezone(),
        instant in arb_instant(),
    ) {
        let Some(t) = local(&tz, instant) else { return Ok(()) };
        let got = times(&t, lat, lon);
        prop_assert!(got.is_ok(), "unexpected polar result at lat {lat}");
        let got = got.unwrap();
        prop_assert!(got.rise < got.noon);
        prop_assert!(got.noon < got.set);
    }
}

// ---------------------------------------------------------------------------
// Property 3: determinism
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn repeated_queries_are_identical(
        event in arb_event(),
        lat in arb_latitude(),
        lon in arb_longitude(),
        tz in arb_timezone(),
        instant in arb_instant(),
    ) {
        let Some(t) = local(&tz, instant) else { return Ok(()) };
        prop_assert_eq!(times(&t, lat, lon).ok(), times(&t, lat, lon).ok());

        let schedule = SolarSchedule::new(event, Duration::zero(), lat, lon, t.timezone());
        prop_assert_eq!(schedule.next(&t), schedule.next(&t));
    }
}

// ---------------------------------------------------------------------------
// Property 4: re-querying just before the fire instant is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn requery_before_fire_instant_is_idempotent(
        event in arb_event(),
        lat in arb_latitude(),
        lon in arb_longitude(),
        tz in arb_timezone(),
        instant in arb_instant(),
    ) {
        let Some(t) = local(&tz, instant) else { return Ok(()) };
        let schedule = SolarSchedule::new(event, Duration::zero(), lat, lon, t.timezone());
        let Some(next) = schedule.next(&t) else { return Ok(()) };
        prop_assert_eq!(
            schedule.next(&(next - Duration::seconds(1))),
            Some(next),
            "re-query one second before the fire instant moved the instant"
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: offset linearity on the same search day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn offset_shifts_linearly_on_the_same_day(
        event in arb_event(),
        city in arb_city(),
        instant in arb_instant(),
        offset_minutes in -30i64..=30,
    ) {
        // Query just after local midnight so both the shifted and unshifted
        // candidates are still ahead on the query's own day.
        let (tz, lat, lon) = city;
        let (y, mo, d, _, _) = instant;
        let Some(t) = local(tz, (y, mo, d, 0, 30)) else { return Ok(()) };

        let base = SolarSchedule::new(event, Duration::zero(), lat, lon, t.timezone());
        let shifted = SolarSchedule::new(
            event,
            Duration::minutes(offset_minutes),
            lat,
            lon,
            t.timezone(),
        );

        let (Some(n0), Some(n1)) = (base.next(&t), shifted.next(&t)) else { return Ok(()) };
        prop_assert_eq!(n1, n0 + Duration::minutes(offset_minutes));
    }
}
