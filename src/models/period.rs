//! Budget period representation
//!
//! A budget period is the half-open interval between two consecutive
//! effective paydays, expressed in the reference timezone. Periods are
//! derived from income settings and a reference instant; they are never
//! persisted.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt;

/// A payday-anchored budget period: `[start, end)`
///
/// The start instant is inclusive and the end instant is exclusive: a
/// transaction occurring exactly at a boundary belongs to the period that
/// starts there, not the one that ends there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPeriod {
    /// First instant of the period (inclusive)
    pub start: DateTime<Tz>,

    /// First instant of the next period (exclusive)
    pub end: DateTime<Tz>,
}

impl BudgetPeriod {
    /// Create a period from its bounding instants
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// Check if an instant falls within this period (start-inclusive,
    /// end-exclusive)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
