//! Error types for descriptor parsing and solar time calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by the parser and the solar calculator.
///
/// Every variant describes bad input; nothing here is a panic path. Errors
/// from the fallback cron parser pass through unchanged via [`ScheduleError::Cron`].
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The `TZ=`/`CRON_TZ=` prefix named an unknown timezone.
    #[error("bad location {tz:?}")]
    BadLocation { tz: String },

    /// The offset following the event marker was not a valid duration literal.
    #[error("bad offset {token:?}")]
    BadOffset { token: String },

    /// The descriptor did not end in exactly two coordinate fields.
    #[error("bad lat/lon {rest:?}")]
    BadLatLon { rest: String },

    /// The latitude field was not a decimal number.
    #[error("bad latitude {field:?}")]
    BadLatitude { field: String },

    /// The longitude field was not a decimal number.
    #[error("bad longitude {field:?}")]
    BadLongitude { field: String },

    /// An event marker was present somewhere in the spec but not at the
    /// start of the descriptor.
    #[error("misplaced event marker in {spec:?}")]
    MisplacedMarker { spec: String },

    /// The sun does not rise or set at this latitude on this date
    /// (polar day or polar night).
    #[error("no sunrise or sunset at latitude {lat} on {date}")]
    NoSuchEvent { lat: f64, date: NaiveDate },

    /// A non-solar spec was rejected by the fallback cron parser.
    #[error(transparent)]
    Cron(#[from] cron::error::Error),
}

/// Convenience alias used throughout solar-cron.
pub type Result<T> = std::result::Result<T, ScheduleError>;
