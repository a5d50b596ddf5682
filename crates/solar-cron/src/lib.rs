//! # solar-cron
//!
//! Sunrise, solar noon, and sunset schedules for cron-style job schedulers.
//!
//! Solar events are computed with the NOAA low-precision approximation and
//! exposed through the same "next fire time strictly after t" contract a
//! generic recurring-job scheduler expects from any schedule. A compact
//! descriptor grammar selects the event, an optional offset, the
//! coordinates, and an optional timezone; anything that is not a solar
//! descriptor is handed to a pluggable cron expression parser.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::TimeZone;
//! use solar_cron::{Event, Parser, Schedule};
//!
//! // Half an hour before sunset in Paris.
//! let parser = Parser::default();
//! let schedule = parser
//!     .parse_solar("@sunset-30m 48.856614 2.3522219", Event::Sunset)
//!     .unwrap();
//!
//! let now = chrono_tz::UTC.with_ymd_and_hms(2021, 7, 30, 12, 0, 0).unwrap();
//! let next = schedule.next(&now).unwrap();
//! assert!(next > now);
//! ```
//!
//! ## Modules
//!
//! - [`solar`] — NOAA sunrise/noon/sunset calculation
//! - [`schedule`] — the [`Schedule`] trait and [`SolarSchedule`]
//! - [`parser`] — descriptor grammar and the cron fallback seam
//! - [`event`] — the [`Event`] enum
//! - [`error`] — error types

pub mod error;
pub mod event;
pub mod parser;
pub mod schedule;
pub mod solar;

pub use error::ScheduleError;
pub use event::Event;
pub use parser::{CronParser, CronSchedule, Parser, ScheduleParser};
pub use schedule::{Schedule, SolarSchedule};
pub use solar::{times, SolarTimes};
