//! Transaction model
//!
//! A single spend: positive yen amount, the instant it occurred, and an
//! optional category reference. A missing category means "uncategorized";
//! a reference to a deleted category is tolerated by the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TransactionId};
use super::money::Yen;

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The category this transaction belongs to; None = uncategorized
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Amount spent, in yen (strictly positive once past validation)
    pub amount: Yen,

    /// When the transaction occurred (ISO-8601 on the wire)
    pub occurred_at: DateTime<Utc>,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(amount: Yen, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            category_id: None,
            amount,
            occurred_at,
            note: None,
        }
    }

    /// Create a new transaction assigned to a category
    pub fn with_category(amount: Yen, occurred_at: DateTime<Utc>, category_id: CategoryId) -> Self {
        let mut txn = Self::new(amount, occurred_at);
        txn.category_id = Some(category_id);
        txn
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
