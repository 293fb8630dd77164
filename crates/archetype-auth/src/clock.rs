//! Time source used to stamp signed requests

use chrono::Utc;

/// Source of the request timestamp
///
/// The transport never reads the system time directly, so signing can be
/// made deterministic by swapping in a [`FixedClock`].
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current unix time in whole seconds
    fn unix_seconds(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}
