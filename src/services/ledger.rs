//! Ledger aggregation
//!
//! Buckets transaction amounts by category inside a budget period and
//! computes each bucket's share of monthly income. Transactions without a
//! category land in a synthetic "Uncategorized" bucket; a transaction whose
//! category no longer exists keeps its amount under the dangling id with the
//! display name "Unknown". Amounts are never dropped.

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::{BudgetPeriod, Category, CategoryId, Income, Transaction, Yen};

use super::period::{budget_period, has_income_landed};

/// Reserved bucket id for uncategorized spending, distinct from any real
/// category id
pub const UNCATEGORIZED_BUCKET_ID: &str = "__uncategorized__";

/// An aggregation target: a real category or the synthetic uncategorized
/// bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketId {
    /// A category referenced by id; the category may no longer exist
    Category(CategoryId),
    /// Transactions with no category
    Uncategorized,
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(id) => write!(f, "{}", id.as_uuid()),
            Self::Uncategorized => write!(f, "{}", UNCATEGORIZED_BUCKET_ID),
        }
    }
}

/// One bucket of the per-period aggregation; derived, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationEntry {
    /// The bucket this entry aggregates
    pub bucket: BucketId,
    /// Display name: the category name, "Uncategorized", or "Unknown" for a
    /// dangling reference
    pub name: String,
    /// Summed amount inside the period
    pub total: Yen,
    /// Share of monthly income, rounded to whole percent (may exceed 100)
    pub percent_of_income: i64,
}

/// Group transaction amounts by category inside `period`.
///
/// Only transactions with `period.start <= occurred_at < period.end` count.
/// The result is sparse: buckets with no matching transactions are omitted.
/// Ordering is unspecified; callers sort for display.
pub fn group_by_category(
    categories: &[Category],
    transactions: &[Transaction],
    period: &BudgetPeriod,
    income: Yen,
) -> Vec<AggregationEntry> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut totals: HashMap<BucketId, Yen> = HashMap::new();
    for txn in transactions {
        if !period.contains(txn.occurred_at) {
            continue;
        }
        let bucket = match txn.category_id {
            Some(id) => BucketId::Category(id),
            None => BucketId::Uncategorized,
        };
        *totals.entry(bucket).or_insert_with(Yen::zero) += txn.amount;
    }

    totals
        .into_iter()
        .map(|(bucket, total)| {
            let name = match bucket {
                BucketId::Uncategorized => "Uncategorized".to_string(),
                BucketId::Category(id) => names
                    .get(&id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
            };
            AggregationEntry {
                bucket,
                name,
                total,
                percent_of_income: percent_of_income(total, income),
            }
        })
        .collect()
}

/// Share of income as a rounded whole percent.
///
/// Income is floored at 1 yen so a zero or negative income yields a defined
/// (if large) percentage rather than a division failure.
pub fn percent_of_income(total: Yen, income: Yen) -> i64 {
    let floor = income.amount().max(1);
    ((total.amount() as f64 / floor as f64) * 100.0).round() as i64
}

/// A planned-spending row for the planning view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub id: CategoryId,
    pub name: String,
    pub total: Yen,
}

/// Non-archived categories with a positive planned amount.
///
/// A planning view independent of actual spend, not an aggregation over
/// transactions.
pub fn planned_breakdown(categories: &[Category]) -> Vec<PlannedEntry> {
    categories
        .iter()
        .filter(|c| !c.is_archived)
        .filter_map(|c| {
            c.planned_amount
                .filter(|a| a.is_positive())
                .map(|total| PlannedEntry {
                    id: c.id,
                    name: c.name.clone(),
                    total,
                })
        })
        .collect()
}

/// Sum of all transaction amounts inside `period`
pub fn total_spent(transactions: &[Transaction], period: &BudgetPeriod) -> Yen {
    transactions
        .iter()
        .filter(|t| period.contains(t.occurred_at))
        .map(|t| t.amount)
        .sum()
}

/// Dashboard summary for the budget period containing `reference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    /// The containing budget period
    pub period: BudgetPeriod,
    /// Whether this calendar month's income has arrived
    pub has_landed: bool,
    /// Income counted as available: the full amount once landed, else zero
    pub available_income: Yen,
    /// Total spent inside the period
    pub total_spent: Yen,
    /// Available income minus spending; negative means overspent
    pub remaining: Yen,
}

/// Compute the period summary for the given income settings and reference
/// instant.
pub fn summarize(
    income: &Income,
    transactions: &[Transaction],
    reference: DateTime<Tz>,
) -> PeriodSummary {
    let period = budget_period(income.payday, reference);
    let has_landed = has_income_landed(income.payday, reference);
    let available_income = if has_landed { income.amount } else { Yen::zero() };
    let spent = total_spent(transactions, &period);

    PeriodSummary {
        has_landed,
        available_income,
        total_spent: spent,
        remaining: available_income - spent,
        period,
    }
}
