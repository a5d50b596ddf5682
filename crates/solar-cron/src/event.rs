//! The closed set of solar events a schedule can track.

use std::fmt;

/// A solar event on a given civil day.
///
/// Being a closed enum, every consumer matches exhaustively — there is no
/// representable "invalid event" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Sunrise,
    Noon,
    Sunset,
}

impl Event {
    /// All events, in descriptor-dispatch order.
    pub const ALL: [Event; 3] = [Event::Sunrise, Event::Noon, Event::Sunset];

    /// The descriptor marker for this event (`@sunrise`, `@noon`, `@sunset`).
    pub fn marker(self) -> &'static str {
        match self {
            Event::Sunrise => "@sunrise",
            Event::Noon => "@noon",
            Event::Sunset => "@sunset",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
