//! NOAA low-precision solar position approximation.
//!
//! Computes sunrise, solar noon, and sunset for a calendar date and
//! geographic coordinate, following the formulae in the NOAA solar
//! calculation worksheet (<https://gml.noaa.gov/grad/solcalc/solareqns.PDF>).
//!
//! The computation is pure and cheap enough to redo on every scheduling
//! decision — nothing is cached.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Utc};

use crate::error::{Result, ScheduleError};

/// Sunrise, solar noon, and sunset on a single civil day, in the timezone
/// of the input date.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTimes<Tz: TimeZone> {
    pub rise: DateTime<Tz>,
    pub noon: DateTime<Tz>,
    pub set: DateTime<Tz>,
}

/// Compute the sun rise, solar noon, and sun set times for the given date
/// and location.
///
/// All three instants are anchored to the same civil day as `date` and
/// expressed in `date`'s timezone. The hour-of-day of `date` feeds into the
/// fractional-year angle, so date-only callers should normalize to noon
/// (as [`SolarSchedule`](crate::SolarSchedule) does).
///
/// # Errors
/// Returns [`ScheduleError::NoSuchEvent`] when the sun neither rises nor
/// sets on this date at this latitude (polar day or polar night).
pub fn times<Tz: TimeZone>(date: &DateTime<Tz>, lat: f64, lon: f64) -> Result<SolarTimes<Tz>> {
    let gamma = fractional_year(date);
    let decl = solar_declination(gamma);
    let ha = deg(hour_angle(lat, decl).ok_or(ScheduleError::NoSuchEvent {
        lat,
        date: date.date_naive(),
    })?);
    let eq_time = equation_of_time(gamma);
    Ok(SolarTimes {
        rise: time_from_minutes(date, 720.0 - 4.0 * (lon + ha) - eq_time),
        noon: time_from_minutes(date, 720.0 - 4.0 * lon - eq_time),
        set: time_from_minutes(date, 720.0 - 4.0 * (lon - ha) - eq_time),
    })
}

/// Fractional year in radians, indexed by day-of-year and hour-of-day read
/// in the date's own timezone.
fn fractional_year<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    let day_of_year = date.ordinal() as f64 - 1.0;
    let hour = date.hour() as f64;
    (2.0 * PI / days_in_year(date.year())) * (day_of_year + (hour - 12.0) / 24.0)
}

/// Days in the year under the Gregorian leap rule.
fn days_in_year(year: i32) -> f64 {
    if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
        366.0
    } else {
        365.0
    }
}

/// Solar declination angle in radians (seven-term Fourier truncation).
fn solar_declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

/// Equation of time in minutes (four-term Fourier truncation).
fn equation_of_time(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

/// Hour angle in radians at the standard 90.833° refraction horizon, or
/// `None` when the arc-cosine argument leaves [-1, 1] (polar day/night).
fn hour_angle(lat: f64, decl: f64) -> Option<f64> {
    let lat_rad = rad(lat);
    let cos_ha = rad(90.833).cos() / (lat_rad.cos() * decl.cos()) - lat_rad.tan() * decl.tan();
    if !(-1.0..=1.0).contains(&cos_ha) {
        return None;
    }
    Some(cos_ha.acos())
}

fn deg(a: f64) -> f64 {
    a / PI * 180.0
}

fn rad(a: f64) -> f64 {
    a / 180.0 * PI
}

/// Interpret a minute-of-day offset against midnight UTC of the date's UTC
/// calendar day, then re-express the instant in the date's timezone.
///
/// Minutes are split by truncation into hour/minute/second components,
/// matching the NOAA worksheet arithmetic.
fn time_from_minutes<Tz: TimeZone>(date: &DateTime<Tz>, minutes: f64) -> DateTime<Tz> {
    let hour = minutes as i64 / 60;
    let min = minutes as i64 % 60;
    let sec = (minutes.fract() * 60.0) as i64;
    let utc_midnight = date
        .with_timezone(&Utc)
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    (utc_midnight + Duration::hours(hour) + Duration::minutes(min) + Duration::seconds(sec))
        .with_timezone(&date.timezone())
}
