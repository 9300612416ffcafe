//! Income settings model
//!
//! Monthly income amount and the nominal payday-of-month it arrives on.
//! The payday is stored exactly as the user entered it (1-31); clamping to
//! the length of a concrete month happens only at period-computation time,
//! never by rewriting the stored value.

use serde::{Deserialize, Serialize};

use super::money::Yen;

/// The fixed reference timezone tag carried by the persisted document
pub const REFERENCE_TIMEZONE: &str = "Asia/Tokyo";

/// Monthly income settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    /// Monthly income amount in yen
    #[serde(default)]
    pub amount: Yen,

    /// Nominal day-of-month the income lands on (1-31, as entered);
    /// may exceed a given month's actual length
    #[serde(default = "default_payday")]
    pub payday: u32,

    /// Reference timezone; always "Asia/Tokyo"
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_payday() -> u32 {
    1
}

fn default_timezone() -> String {
    REFERENCE_TIMEZONE.to_string()
}

impl Default for Income {
    fn default() -> Self {
        Self {
            amount: Yen::zero(),
            payday: default_payday(),
            timezone: default_timezone(),
        }
    }
}

impl Income {
    /// Create income settings
    pub fn new(amount: Yen, payday: u32) -> Self {
        Self {
            amount,
            payday,
            timezone: default_timezone(),
        }
    }
}
