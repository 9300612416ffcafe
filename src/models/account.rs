//! Account model
//!
//! The single user-owned account tracking the current balance. Mutated only
//! through explicit settings updates in the calling layer.

use serde::{Deserialize, Serialize};

use super::money::Yen;

/// The user's account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Current balance in yen
    #[serde(default)]
    pub current_balance: Yen,
}

impl Account {
    /// Create an account with the given balance
    pub fn new(current_balance: Yen) -> Self {
        Self { current_balance }
    }

    /// Set the current balance
    pub fn set_balance(&mut self, balance: Yen) {
        self.current_balance = balance;
    }
}
