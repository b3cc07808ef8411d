//! Test doubles shared by unit tests and the integration suites in `tests/`.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

mod in_memory;

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

pub use in_memory::InMemoryScoreboard;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Instant used by [`fixed_clock`]: 2024-08-15 21:22:23 UTC.
pub fn fixture_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 15, 21, 22, 23)
        .single()
        .unwrap_or_default()
}

/// [`fixture_instant`] without its time zone, as stored for scores.
pub fn fixture_timestamp() -> NaiveDateTime {
    fixture_instant().naive_utc()
}

/// Shared clock frozen at [`fixture_instant`].
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at(fixture_instant()))
}
