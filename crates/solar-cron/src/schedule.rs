//! Solar event schedules — "next occurrence strictly after t" for sunrise,
//! solar noon, and sunset, with an optional fixed offset.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::event::Event;
use crate::solar;

/// The contract a recurring schedule exposes to a scheduler loop.
///
/// Implementations are immutable after construction and safe to query from
/// multiple threads without coordination.
pub trait Schedule: fmt::Debug + Send + Sync {
    /// The next activation strictly after `after`, expressed in the
    /// schedule's own timezone, or `None` when no further activation
    /// exists.
    fn next(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>>;
}

/// A schedule that fires at a solar event, optionally offset by a fixed
/// duration.
///
/// The timezone decides which civil day a query instant falls on and how
/// the returned instant is rendered. Latitude and longitude are not range
/// checked; coordinates outside the usual ranges degrade in the underlying
/// astronomy rather than failing structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSchedule {
    event: Event,
    offset: Duration,
    lat: f64,
    lon: f64,
    tz: Tz,
}

impl SolarSchedule {
    pub fn new(event: Event, offset: Duration, lat: f64, lon: f64, tz: Tz) -> Self {
        SolarSchedule {
            event,
            offset,
            lat,
            lon,
            tz,
        }
    }

    pub fn event(&self) -> Event {
        self.event
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The raw event instant on the given civil day, before the offset.
    ///
    /// The calculator is fed local noon rather than the query's clock time
    /// so the fractional-year angle is not perturbed by the hour of the
    /// query. `None` when the event does not occur on this day (polar
    /// day/night) or noon is not representable in the schedule's timezone.
    fn event_on(&self, day: NaiveDate) -> Option<DateTime<Tz>> {
        let local_noon = self.tz.from_local_datetime(&day.and_hms_opt(12, 0, 0)?).single()?;
        let times = solar::times(&local_noon, self.lat, self.lon).ok()?;
        Some(match self.event {
            Event::Sunrise => times.rise,
            Event::Noon => times.noon,
            Event::Sunset => times.set,
        })
    }
}

impl Schedule for SolarSchedule {
    /// Walks civil days around the query, returning the first event
    /// instant (plus offset) strictly after `after`. The scan runs from
    /// two days before the query to three days after it: a timezone far
    /// from the longitude's meridian can land an event on an adjacent
    /// civil day, and that window covers every alignment. Days where the
    /// event is degenerate (polar day or night) are skipped; a window that
    /// is degenerate throughout yields `None`.
    ///
    /// The boundary is exclusive: a query exactly at the fire instant
    /// returns the following occurrence.
    fn next(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let t = after.with_timezone(&self.tz);
        // Scan against t minus the offset so the offset cannot push the
        // answer outside the day window.
        let target = t - self.offset;
        let mut day = target.date_naive().pred_opt()?.pred_opt()?;
        for _ in 0..6 {
            if let Some(event) = self.event_on(day) {
                if target < event {
                    return Some(event + self.offset);
                }
            }
            day = day.succ_opt()?;
        }
        None
    }
}

impl fmt::Display for SolarSchedule {
    /// Renders the schedule's own descriptor, e.g.
    /// `@sunset-30m 48.856614 2.3522219`. The timezone prefix is not
    /// rendered; parsing the result with the same default timezone
    /// reproduces the schedule.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event)?;
        if !self.offset.is_zero() {
            write_offset(f, self.offset)?;
        }
        write!(f, " {} {}", self.lat, self.lon)
    }
}

/// Write a non-zero offset as a signed duration literal in the largest
/// units that fit (`+1h10m`, `-30m`, `+1m30s`).
fn write_offset(f: &mut fmt::Formatter<'_>, offset: Duration) -> fmt::Result {
    let ms = offset.num_milliseconds();
    f.write_str(if ms < 0 { "-" } else { "+" })?;
    let ms = ms.unsigned_abs();
    let (h, m, s, ms) = (ms / 3_600_000, ms / 60_000 % 60, ms / 1000 % 60, ms % 1000);
    if h > 0 {
        write!(f, "{h}h")?;
    }
    if m > 0 {
        write!(f, "{m}m")?;
    }
    if s > 0 {
        write!(f, "{s}s")?;
    }
    if ms > 0 {
        write!(f, "{ms}ms")?;
    }
    Ok(())
}
