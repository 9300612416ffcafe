//! Storage layer for budget-pie
//!
//! Persists the single versioned budget document as JSON with atomic writes,
//! and runs schema migration exactly once at load time, before anything else
//! reads the state.

pub mod file_io;
pub mod migrate;

pub use file_io::{read_json, write_json_atomic};
pub use migrate::{migrate, migrate_document};

use serde_json::Value;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetResult;
use crate::models::PersistedState;

/// Storage for the persisted budget document
pub struct Store {
    paths: BudgetPaths,
}

impl Store {
    /// Create a new Store instance
    pub fn new(paths: BudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load the persisted document, migrated to the current schema version.
    ///
    /// A missing file yields the first-run seed state; an unreadable file
    /// yields an empty current-version state rather than blocking startup.
    pub fn load(&self) -> BudgetResult<PersistedState> {
        let path = self.paths.store_file();

        if !path.exists() {
            tracing::info!("no store file; seeding first-run state");
            return Ok(PersistedState::seed());
        }

        match read_json::<Value, _>(&path) {
            Ok(raw) => Ok(migrate_document(raw)),
            Err(err) => {
                tracing::warn!(%err, "unreadable store file; starting from empty state");
                Ok(PersistedState::default())
            }
        }
    }

    /// Save the document atomically
    pub fn save(&self, state: &PersistedState) -> BudgetResult<()> {
        write_json_atomic(self.paths.store_file(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Yen, CURRENT_SCHEMA_VERSION};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = Store::new(paths).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_seeds() {
        let (_temp_dir, store) = create_test_store();

        let state = store.load().unwrap();
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.income.amount, Yen::new(200_000));
        assert_eq!(state.income.payday, 27);
        assert_eq!(state.categories.len(), 5);
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp_dir, store) = create_test_store();

        let mut state = PersistedState::seed();
        state.account.set_balance(Yen::new(42000));
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_migrates_old_document() {
        let (_temp_dir, store) = create_test_store();

        let v1 = r#"{
            "schemaVersion": 1,
            "income": { "amount": 200000, "payday": 27, "timezone": "Asia/Tokyo" },
            "categories": [
                {
                    "id": "11111111-1111-4111-8111-111111111111",
                    "name": "Food",
                    "isArchived": false,
                    "allocation": 50
                }
            ],
            "transactions": []
        }"#;
        std::fs::write(store.paths().store_file(), v1).unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.categories[0].planned_amount, Some(Yen::new(100_000)));
    }

    #[test]
    fn test_load_corrupt_file_yields_empty_state() {
        let (_temp_dir, store) = create_test_store();

        std::fs::write(store.paths().store_file(), "not json at all").unwrap();

        let state = store.load().unwrap();
        assert_eq!(state, PersistedState::default());
    }
}
