//! Time sources.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies the current time in milliseconds.
///
/// Only differences between readings matter, so any fixed epoch works.
pub trait Clock: Send + Sync {
    fn millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
