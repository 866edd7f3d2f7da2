//! Injectable time source.
//!
//! The engine never reads the system clock directly. Rights expiration is
//! compared on calendar dates while slot transitions compare full
//! timestamps, so the trait exposes both.

use chrono::{DateTime, NaiveDate, Utc};

/// Time source consumed by the schedule engine.
pub trait Clock: Send + Sync {
    /// Current instant, used for slot due-ness and `created_at` stamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for rights expiration checks.
    ///
    /// Time of day is irrelevant to expiration: rights purchased through
    /// a given date remain valid for the whole of that date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for deterministic tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct FixedClock {
    now: parking_lot::Mutex<DateTime<Utc>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: parking_lot::Mutex::new(now),
        }
    }

    /// Moves the clock to a new instant. Never moves it backwards in tests
    /// that model a running system.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Advances the clock by a duration.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
