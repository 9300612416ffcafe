//! Category model
//!
//! Spending categories with an optional planned amount per month. Archiving
//! hides a category from new-transaction pickers without deleting history.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Yen;

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Whether this category is hidden from new-transaction pickers
    #[serde(default)]
    pub is_archived: bool,

    /// Planned spending amount per month (absolute yen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_amount: Option<Yen>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            is_archived: false,
            planned_amount: None,
        }
    }

    /// Create a new category with a planned amount
    pub fn with_planned_amount(name: impl Into<String>, planned_amount: Yen) -> Self {
        let mut category = Self::new(name);
        category.planned_amount = Some(planned_amount);
        category
    }

    /// Set the planned amount
    pub fn set_planned_amount(&mut self, amount: Yen) {
        self.planned_amount = Some(amount);
    }

    /// Clear the planned amount
    pub fn clear_planned_amount(&mut self) {
        self.planned_amount = None;
    }

    /// Archive the category, hiding it from new-transaction pickers
    pub fn archive(&mut self) {
        self.is_archived = true;
    }

    /// Restore an archived category
    pub fn unarchive(&mut self) {
        self.is_archived = false;
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Food");
        assert_eq!(category.name, "Food");
        assert!(!category.is_archived);
        assert!(category.planned_amount.is_none());
    }

    #[test]
    fn test_planned_amount() {
        let mut category = Category::new("Rent");
        category.set_planned_amount(Yen::new(80000));
        assert_eq!(category.planned_amount, Some(Yen::new(80000)));

        category.clear_planned_amount();
        assert!(category.planned_amount.is_none());
    }

    #[test]
    fn test_archive() {
        let mut category = Category::new("Snacks");
        category.archive();
        assert!(category.is_archived);

        category.unarchive();
        assert!(!category.is_archived);
    }

    #[test]
    fn test_serialization_omits_absent_planned_amount() {
        let category = Category::new("Food");
        let json = serde_json::to_string(&category).unwrap();
        assert!(!json.contains("plannedAmount"));

        let with_plan = Category::with_planned_amount("Rent", Yen::new(80000));
        let json = serde_json::to_string(&with_plan).unwrap();
        assert!(json.contains("\"plannedAmount\":80000"));

        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(with_plan, deserialized);
    }
}
