//! Clock abstraction
//!
//! Supplies the current instant in the reference timezone so period
//! computations stay deterministic in tests.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::period::TOKYO;

/// Clock abstracts access to the current instant so callers remain
/// deterministic in tests.
pub trait Clock {
    /// Returns the current instant in the reference timezone (Asia/Tokyo).
    fn now(&self) -> DateTime<Tz>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&TOKYO)
    }
}
