//! Validation rules
//!
//! Stateless predicates gating user input before it reaches the persisted
//! store. These run at the boundary only; derived and loaded data is handled
//! defensively elsewhere and never raises a validation error.

use std::fmt;

use crate::error::BudgetError;
use crate::models::{Category, Yen};

/// Validation errors for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    PaydayOutOfRange(u32),
    NonPositiveAmount(Yen),
    OverAllocated { planned: Yen, income: Yen },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PaydayOutOfRange(n) => {
                write!(f, "Payday must be between 1 and 31 (got {})", n)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::OverAllocated { planned, income } => {
                write!(f, "Planned total {} exceeds income {}", planned, income)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for BudgetError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A payday must be a day-of-month between 1 and 31.
pub fn validate_payday(payday: u32) -> Result<(), ValidationError> {
    if (1..=31).contains(&payday) {
        Ok(())
    } else {
        Err(ValidationError::PaydayOutOfRange(payday))
    }
}

/// A transaction amount must be strictly positive.
pub fn validate_amount(amount: Yen) -> Result<(), ValidationError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

/// Clamp a percentage to [0, 100]; non-finite input coerces to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Reject a budget plan whose non-archived planned amounts sum past income.
///
/// Blocks saving an over-allocated plan; never blocks a single transaction
/// insert.
pub fn validate_category_total(categories: &[Category], income: Yen) -> Result<(), ValidationError> {
    let planned: Yen = categories
        .iter()
        .filter(|c| !c.is_archived)
        .filter_map(|c| c.planned_amount)
        .sum();

    if planned > income {
        Err(ValidationError::OverAllocated { planned, income })
    } else {
        Ok(())
    }
}
