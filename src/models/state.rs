//! Persisted document model
//!
//! The versioned JSON document holding everything the user owns: account,
//! income settings, categories, and transactions. This is the unit of
//! migration; every field tolerates being absent so that an old or partially
//! written document still loads.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::category::Category;
use super::ids::CategoryId;
use super::income::Income;
use super::money::Yen;
use super::transaction::Transaction;

/// Schema version emitted by the current code
///
/// History: 1 = initial (categories carried an `allocation` percent, demo
/// transactions present); 2 = demo transactions pruned; 3 = `allocation`
/// replaced by `plannedAmount` in absolute yen.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// The persisted budget document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Schema version this document was written at
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The user's account
    #[serde(default)]
    pub account: Account,

    /// Monthly income settings
    #[serde(default)]
    pub income: Income,

    /// Spending categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Recorded transactions
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            account: Account::default(),
            income: Income::default(),
            categories: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl PersistedState {
    /// First-run state: starter categories and default income settings,
    /// no transactions
    pub fn seed() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            account: Account::default(),
            income: Income::new(Yen::new(200_000), 27),
            categories: vec![
                Category::new("Food"),
                Category::new("Rent"),
                Category::new("Utilities"),
                Category::new("Going Out"),
                Category::new("Snacks"),
            ],
            transactions: Vec::new(),
        }
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}
