//! Core data models for budget-pie
//!
//! This module contains the data structures that represent the budgeting
//! domain: the account balance, income settings, categories, transactions,
//! derived budget periods, and the versioned persisted document.

pub mod account;
pub mod category;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod state;
pub mod transaction;

pub use account::Account;
pub use category::Category;
pub use ids::{CategoryId, TransactionId};
pub use income::Income;
pub use money::Yen;
pub use period::BudgetPeriod;
pub use state::{PersistedState, CURRENT_SCHEMA_VERSION};
pub use transaction::Transaction;
