//! Payday-anchored period calculation
//!
//! All computations resolve in the fixed reference timezone (Asia/Tokyo).
//! The nominal payday is clamped to the length of the concrete month only at
//! computation time; the stored value is never rewritten.
//!
//! Two distinct notions of "period" live here on purpose:
//!
//! - `has_income_landed` is a same-calendar-month test ("has this month's
//!   paycheck arrived").
//! - `start_of_budget_period` / `next_budget_period_start` define the
//!   rolling payday-to-payday window. Just after a new calendar month begins
//!   but before that month's payday, the budget period is still anchored to
//!   last month's payday while the landed check already evaluates the new
//!   month. Do not unify them.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::models::BudgetPeriod;

/// The fixed reference timezone. JST has no daylight-saving transitions.
pub const TOKYO: Tz = chrono_tz::Asia::Tokyo;

/// Resolve the nominal payday to a concrete day within the month containing
/// `reference`, at start-of-day in the reference timezone.
///
/// The resolved day is `min(max(payday, 1), days_in_month)`: payday 31 in a
/// 30-day month resolves to day 30, and in February to the month's last day.
/// Out-of-range paydays are clamped here even though validation should have
/// rejected them upstream.
pub fn effective_payday(payday: u32, reference: DateTime<Tz>) -> DateTime<Tz> {
    let local = reference.with_timezone(&TOKYO);
    effective_payday_in(payday, local.year(), local.month())
}

/// Check whether this calendar month's income has arrived: true iff
/// `reference` is at or after the current month's effective payday.
pub fn has_income_landed(payday: u32, reference: DateTime<Tz>) -> bool {
    reference >= effective_payday(payday, reference)
}

/// The most recent effective payday at or before `reference`.
///
/// If `reference` falls before this month's effective payday, the period
/// start is last month's effective payday, resolved against the previous
/// calendar month (never by subtracting a fixed day count; month lengths
/// differ).
pub fn start_of_budget_period(payday: u32, reference: DateTime<Tz>) -> DateTime<Tz> {
    let local = reference.with_timezone(&TOKYO);
    let this_month = effective_payday_in(payday, local.year(), local.month());
    if local >= this_month {
        this_month
    } else {
        let (year, month) = previous_month(local.year(), local.month());
        effective_payday_in(payday, year, month)
    }
}

/// The effective payday of the calendar month immediately following the
/// current period's start month.
pub fn next_budget_period_start(payday: u32, reference: DateTime<Tz>) -> DateTime<Tz> {
    let start = start_of_budget_period(payday, reference);
    let (year, month) = following_month(start.year(), start.month());
    effective_payday_in(payday, year, month)
}

/// The budget period containing `reference`: start-inclusive, end-exclusive.
pub fn budget_period(payday: u32, reference: DateTime<Tz>) -> BudgetPeriod {
    BudgetPeriod::new(
        start_of_budget_period(payday, reference),
        next_budget_period_start(payday, reference),
    )
}

/// Resolve the payday within a specific calendar month
fn effective_payday_in(payday: u32, year: i32, month: u32) -> DateTime<Tz> {
    let last_day = days_in_month(year, month);
    let day = payday.max(1).min(last_day);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default());
    start_of_day(date)
}

/// Start of day in the reference timezone. JST has no DST, so local
/// midnight always exists exactly once; the fallback is never expected.
fn start_of_day(date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    TOKYO
        .from_local_datetime(&midnight)
        .single()
        .unwrap_or_else(|| TOKYO.from_utc_datetime(&midnight))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = following_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
