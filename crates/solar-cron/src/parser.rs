//! Descriptor parsing — turns compact spec strings into schedules.
//!
//! A spec containing one of the solar event markers is parsed here; anything
//! else is handed verbatim to an injected fallback parser (by default a
//! standard cron expression parser backed by the `cron` crate).
//!
//! Grammar:
//!
//! ```text
//! [TZ=<zone> ]@(sunrise|noon|sunset)([+-]<duration>)? <lat> <lon>
//! ```
//!
//! where `<zone>` is an IANA timezone identifier, `<duration>` is a signed
//! duration literal such as `1h10m`, and `<lat>`/`<lon>` are decimal
//! degrees.

use std::str::FromStr;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};
use crate::event::Event;
use crate::schedule::{Schedule, SolarSchedule};

/// The fallback collaborator interface: parse a non-solar spec into
/// something a scheduler loop can query.
pub trait ScheduleParser: Send + Sync {
    fn parse(&self, spec: &str) -> Result<Box<dyn Schedule>>;
}

/// A spec parser that handles solar event descriptors and delegates any
/// other spec to a fallback cron parser.
///
/// The default timezone is explicit configuration rather than an ambient
/// read of process state, so the parser is pure and testable; specs can
/// still override it with a `TZ=` prefix.
pub struct Parser {
    default_tz: Tz,
    fallback: Box<dyn ScheduleParser>,
}

impl Parser {
    /// A parser that applies `default_tz` to descriptors without a `TZ=`
    /// prefix and delegates non-solar specs to [`CronParser`].
    pub fn new(default_tz: Tz) -> Self {
        Parser {
            default_tz,
            fallback: Box::new(CronParser::new(default_tz)),
        }
    }

    /// Replace the fallback parser used for non-solar specs.
    pub fn with_fallback(mut self, fallback: Box<dyn ScheduleParser>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Parse a spec into a schedule.
    ///
    /// Specs containing a solar event marker are parsed as solar
    /// descriptors; everything else goes to the fallback parser, whose
    /// errors pass through unchanged.
    pub fn parse(&self, spec: &str) -> Result<Box<dyn Schedule>> {
        match Event::ALL.iter().find(|e| spec.contains(e.marker())) {
            Some(&event) => Ok(Box::new(self.parse_solar(spec, event)?)),
            None => self.fallback.parse(spec),
        }
    }

    /// Parse a solar descriptor for the given event.
    ///
    /// # Errors
    /// - [`ScheduleError::BadLocation`] — unresolvable `TZ=` prefix.
    /// - [`ScheduleError::MisplacedMarker`] — the marker is not at the
    ///   start of the descriptor.
    /// - [`ScheduleError::BadOffset`] — malformed duration token.
    /// - [`ScheduleError::BadLatLon`], [`ScheduleError::BadLatitude`],
    ///   [`ScheduleError::BadLongitude`] — malformed coordinate pair.
    pub fn parse_solar(&self, spec: &str, event: Event) -> Result<SolarSchedule> {
        let mut rest = spec;
        let mut tz = self.default_tz;

        if rest.starts_with("TZ=") || rest.starts_with("CRON_TZ=") {
            // The prefix runs to the first space; a spec that is nothing
            // but a prefix leaves an empty descriptor behind.
            let (field, tail) = rest.split_once(' ').unwrap_or((rest, ""));
            let name = field.split_once('=').map_or("", |(_, v)| v);
            tz = name
                .parse()
                .map_err(|_| ScheduleError::BadLocation { tz: name.to_string() })?;
            rest = tail;
        }

        let rest = rest
            .strip_prefix(event.marker())
            .ok_or_else(|| ScheduleError::MisplacedMarker {
                spec: spec.to_string(),
            })?;

        let (offset, rest) = if rest.starts_with(['+', '-']) {
            let (token, tail) = rest.split_once(' ').unwrap_or((rest, ""));
            (parse_offset(token)?, tail)
        } else {
            (Duration::zero(), rest)
        };

        let fields: Vec<&str> = rest.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(ScheduleError::BadLatLon {
                rest: rest.trim().to_string(),
            });
        }
        let lat: f64 = fields[0].parse().map_err(|_| ScheduleError::BadLatitude {
            field: fields[0].to_string(),
        })?;
        let lon: f64 = fields[1].parse().map_err(|_| ScheduleError::BadLongitude {
            field: fields[1].to_string(),
        })?;

        Ok(SolarSchedule::new(event, offset, lat, lon, tz))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(Tz::UTC)
    }
}

impl ScheduleParser for Parser {
    fn parse(&self, spec: &str) -> Result<Box<dyn Schedule>> {
        Parser::parse(self, spec)
    }
}

/// Parse a signed duration literal: an optional sign followed by one or
/// more `<number><unit>` terms, with units `h`, `m`, `s`, and `ms`.
/// Numbers may be fractional (`1.5h`).
fn parse_offset(token: &str) -> Result<Duration> {
    let bad = || ScheduleError::BadOffset {
        token: token.to_string(),
    };

    let (sign, mut s) = match token.as_bytes().first() {
        Some(b'-') => (-1.0, &token[1..]),
        Some(b'+') => (1.0, &token[1..]),
        _ => (1.0, token),
    };
    if s.is_empty() {
        return Err(bad());
    }

    let mut total_ms = 0.0_f64;
    while !s.is_empty() {
        // A term is digits (possibly fractional) up to the first non-digit.
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(bad)?;
        if digits_end == 0 {
            return Err(bad());
        }
        let value: f64 = s[..digits_end].parse().map_err(|_| bad())?;
        let unit = &s[digits_end..];
        let (unit_ms, unit_len) = if unit.starts_with("ms") {
            (1.0, 2)
        } else if unit.starts_with('h') {
            (3_600_000.0, 1)
        } else if unit.starts_with('m') {
            (60_000.0, 1)
        } else if unit.starts_with('s') {
            (1000.0, 1)
        } else {
            return Err(bad());
        };
        total_ms += value * unit_ms;
        s = &unit[unit_len..];
    }

    Ok(Duration::milliseconds((sign * total_ms) as i64))
}

/// Fallback parser for standard cron expressions, backed by the `cron`
/// crate (seconds-resolution fields plus `@hourly`-style descriptors).
#[derive(Debug, Clone)]
pub struct CronParser {
    tz: Tz,
}

impl CronParser {
    /// A cron parser whose schedules fire in `tz`.
    pub fn new(tz: Tz) -> Self {
        CronParser { tz }
    }
}

impl Default for CronParser {
    fn default() -> Self {
        CronParser::new(Tz::UTC)
    }
}

impl ScheduleParser for CronParser {
    fn parse(&self, spec: &str) -> Result<Box<dyn Schedule>> {
        let inner = cron::Schedule::from_str(spec)?;
        Ok(Box::new(CronSchedule {
            inner,
            tz: self.tz,
        }))
    }
}

/// A [`Schedule`] adapter over a parsed cron expression.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    inner: cron::Schedule,
    tz: Tz,
}

impl Schedule for CronSchedule {
    fn next(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.inner.after(&after.with_timezone(&self.tz)).next()
    }
}
