//! Time Source
//!
//! Single source of "now" for token issuance and expiry checks.
//! Production uses the wall clock; tests drive a `ManualClock`.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Anything that can tell the current time.
///
/// Callers read it once per operation so every comparison inside one
/// request sees the same instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Second resolution, matching JWT `exp`.
#[derive(Debug)]
pub struct ManualClock {
    current_secs: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current_secs: AtomicI64::new(start.timestamp()),
        }
    }

    /// Jump to an absolute instant (may move backwards).
    pub fn set(&self, instant: DateTime<Utc>) {
        self.current_secs.store(instant.timestamp(), Ordering::SeqCst);
    }

    pub fn advance(&self, delta: Duration) {
        self.current_secs
            .fetch_add(delta.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.current_secs.load(Ordering::SeqCst);
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }
}
