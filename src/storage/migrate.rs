//! Schema migration for the persisted document
//!
//! Migration is an ordered list of named, version-gated transforms over the
//! raw JSON document, applied exactly once at load time before any other
//! code reads the state. Each transform is pure, idempotent, and additive:
//! it only touches the substructure it targets and preserves everything
//! else, unknown fields included.
//!
//! Migration never fails a load. A document that is not an object, a section
//! that doesn't decode, or a list entry that is malformed all degrade to
//! defaults (with a warning) instead of an error; strict validation applies
//! to new user input only, never to loaded data.
//!
//! Adding schema version 4 means appending one `Migration` entry to
//! `MIGRATIONS` and bumping `CURRENT_SCHEMA_VERSION`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::state::CURRENT_SCHEMA_VERSION;
use crate::models::{Account, Category, Income, PersistedState, Transaction};
use crate::services::validation::clamp_percent;

/// A single version-gated transform over the raw document
struct Migration {
    /// Source schema version this transform upgrades from
    from: u32,
    /// Stable name, used in log output
    name: &'static str,
    /// The transform itself; receives the document root
    apply: fn(&mut Map<String, Value>),
}

/// All transforms, in ascending version order
const MIGRATIONS: &[Migration] = &[
    Migration {
        from: 1,
        name: "prune-demo-transactions",
        apply: prune_demo_transactions,
    },
    Migration {
        from: 2,
        name: "allocation-to-planned-amount",
        apply: allocation_to_planned_amount,
    },
];

/// Demo transactions shipped with the v1 seed data, matched by note text and
/// amount together with a null category. The seed carried no stable marker,
/// so this is a best-effort signature match; anything not matching all three
/// fields is preserved untouched.
const DEMO_TRANSACTION_SIGNATURES: &[(&str, i64)] = &[
    ("Coffee", 1200),
    ("Groceries", 4500),
    ("Dining", 18000),
];

/// Migrate a raw document to the current schema version, reading the source
/// version from its `schemaVersion` tag. Documents written before versioning
/// carry no tag and are treated as version 1.
pub fn migrate_document(raw: Value) -> PersistedState {
    let from_version = raw
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(1);

    migrate(raw, from_version)
}

/// Migrate a raw document from `from_version` to the current schema version.
///
/// Transforms gated below `from_version` are skipped entirely; the rest run
/// in ascending version order. The result always carries the current schema
/// version, including when no transform ran.
pub fn migrate(raw: Value, from_version: u32) -> PersistedState {
    let mut root = match raw {
        Value::Object(map) => map,
        _ => {
            tracing::warn!("persisted document is not an object; starting from defaults");
            Map::new()
        }
    };

    for migration in MIGRATIONS {
        if from_version > migration.from {
            continue;
        }
        tracing::info!(name = migration.name, "applying schema transform");
        (migration.apply)(&mut root);
    }

    root.insert(
        "schemaVersion".to_string(),
        Value::from(CURRENT_SCHEMA_VERSION),
    );

    decode(root)
}

/// v1 -> v2: remove the seeded demo transactions
fn prune_demo_transactions(root: &mut Map<String, Value>) {
    if let Some(Value::Array(transactions)) = root.get_mut("transactions") {
        let before = transactions.len();
        transactions.retain(|txn| !is_demo_transaction(txn));
        let removed = before - transactions.len();
        if removed > 0 {
            tracing::info!(removed, "pruned demo transactions");
        }
    }
}

fn is_demo_transaction(txn: &Value) -> bool {
    let uncategorized = txn.get("categoryId").map_or(true, Value::is_null);
    if !uncategorized {
        return false;
    }

    match (
        txn.get("note").and_then(Value::as_str),
        txn.get("amount").and_then(Value::as_i64),
    ) {
        (Some(note), Some(amount)) => DEMO_TRANSACTION_SIGNATURES
            .iter()
            .any(|&(demo_note, demo_amount)| note == demo_note && amount == demo_amount),
        _ => false,
    }
}

/// v2 -> v3: convert the legacy `allocation` percent-of-income into an
/// absolute `plannedAmount` in yen, and drop the legacy field. Categories
/// already carrying `plannedAmount` are left untouched (no double
/// conversion).
fn allocation_to_planned_amount(root: &mut Map<String, Value>) {
    let income_amount = root
        .get("income")
        .and_then(|income| income.get("amount"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let categories = match root.get_mut("categories") {
        Some(Value::Array(categories)) => categories,
        _ => return,
    };

    for category in categories.iter_mut() {
        let category = match category.as_object_mut() {
            Some(category) => category,
            None => continue,
        };

        let already_converted = category
            .get("plannedAmount")
            .map_or(false, |v| !v.is_null());
        if already_converted {
            continue;
        }

        let allocation = match category.get("allocation").and_then(Value::as_f64) {
            Some(allocation) => allocation,
            None => continue,
        };

        let planned = (clamp_percent(allocation) / 100.0 * income_amount).round() as i64;
        category.remove("allocation");
        category.insert("plannedAmount".to_string(), Value::from(planned));
    }
}

/// Decode the migrated document into a typed state, defaulting any section
/// that doesn't decode and dropping malformed list entries
fn decode(root: Map<String, Value>) -> PersistedState {
    PersistedState {
        schema_version: CURRENT_SCHEMA_VERSION,
        account: decode_section::<Account>(root.get("account"), "account"),
        income: decode_section::<Income>(root.get("income"), "income"),
        categories: decode_entries::<Category>(root.get("categories"), "categories"),
        transactions: decode_entries::<Transaction>(root.get("transactions"), "transactions"),
    }
}

fn decode_section<T: DeserializeOwned + Default>(value: Option<&Value>, field: &str) -> T {
    match value {
        None => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            tracing::warn!(field, %err, "malformed section; using defaults");
            T::default()
        }),
    }
}

fn decode_entries<T: DeserializeOwned>(value: Option<&Value>, field: &str) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!(field, "section is not a list; treating as empty");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(field, %err, "dropping undecodable entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Yen;
    use serde_json::json;

    fn v1_document() -> Value {
        json!({
            "schemaVersion": 1,
            "account": { "currentBalance": 50000 },
            "income": { "amount": 200000, "payday": 27, "timezone": "Asia/Tokyo" },
            "categories": [
                {
                    "id": "11111111-1111-4111-8111-111111111111",
                    "name": "Food",
                    "isArchived": false,
                    "allocation": 50
                }
            ],
            "transactions": [
                {
                    "id": "22222222-2222-4222-8222-222222222222",
                    "categoryId": null,
                    "amount": 1200,
                    "occurredAt": "2025-04-02T00:00:00Z",
                    "note": "Coffee"
                },
                {
                    "id": "33333333-3333-4333-8333-333333333333",
                    "categoryId": null,
                    "amount": 1200,
                    "occurredAt": "2025-04-02T00:00:00Z",
                    "note": "Morning coffee"
                }
            ]
        })
    }

    #[test]
    fn test_migrate_v1_prunes_demo_and_converts_allocation() {
        let state = migrate_document(v1_document());

        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);

        // Demo transaction removed; the same-amount different-note one kept
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].note.as_deref(), Some("Morning coffee"));

        // allocation 50% of 200,000 became plannedAmount 100,000
        assert_eq!(state.categories.len(), 1);
        assert_eq!(state.categories[0].planned_amount, Some(Yen::new(100_000)));
    }

    #[test]
    fn test_allocation_field_dropped() {
        let raw = v1_document();
        let mut root = raw.as_object().unwrap().clone();
        allocation_to_planned_amount(&mut root);

        let category = &root["categories"][0];
        assert!(category.get("allocation").is_none());
        assert_eq!(category["plannedAmount"], json!(100000));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let once = migrate_document(v1_document());

        let reserialized = serde_json::to_value(&once).unwrap();
        let twice = migrate_document(reserialized);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_transforms_below_from_version_skipped() {
        // A v3 document containing a demo-shaped transaction keeps it:
        // the prune transform is gated below version 3
        let raw = json!({
            "schemaVersion": 3,
            "income": { "amount": 200000, "payday": 27, "timezone": "Asia/Tokyo" },
            "transactions": [
                {
                    "id": "22222222-2222-4222-8222-222222222222",
                    "categoryId": null,
                    "amount": 1200,
                    "occurredAt": "2025-04-02T00:00:00Z",
                    "note": "Coffee"
                }
            ]
        });

        let state = migrate_document(raw);
        assert_eq!(state.transactions.len(), 1);
    }

    #[test]
    fn test_categorized_lookalike_not_pruned() {
        // Same note and amount, but categorized: not a demo transaction
        let raw = json!({
            "schemaVersion": 1,
            "transactions": [
                {
                    "id": "22222222-2222-4222-8222-222222222222",
                    "categoryId": "11111111-1111-4111-8111-111111111111",
                    "amount": 1200,
                    "occurredAt": "2025-04-02T00:00:00Z",
                    "note": "Coffee"
                }
            ]
        });

        let state = migrate_document(raw);
        assert_eq!(state.transactions.len(), 1);
    }

    #[test]
    fn test_existing_planned_amount_not_double_converted() {
        let raw = json!({
            "schemaVersion": 2,
            "income": { "amount": 200000, "payday": 27, "timezone": "Asia/Tokyo" },
            "categories": [
                {
                    "id": "11111111-1111-4111-8111-111111111111",
                    "name": "Rent",
                    "isArchived": false,
                    "plannedAmount": 80000
                }
            ]
        });

        let state = migrate_document(raw);
        assert_eq!(state.categories[0].planned_amount, Some(Yen::new(80000)));
    }

    #[test]
    fn test_missing_schema_version_treated_as_v1() {
        let mut raw = v1_document();
        raw.as_object_mut().unwrap().remove("schemaVersion");

        let state = migrate_document(raw);
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        // The prune transform ran
        assert_eq!(state.transactions.len(), 1);
    }

    #[test]
    fn test_non_object_document_defaults() {
        let state = migrate_document(json!("garbage"));
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn test_malformed_sections_default_without_failing() {
        let raw = json!({
            "schemaVersion": 3,
            "account": "not an object",
            "income": 42,
            "categories": { "nope": true },
            "transactions": [
                { "id": "bad", "amount": "NaN" },
                {
                    "id": "22222222-2222-4222-8222-222222222222",
                    "amount": 999,
                    "occurredAt": "2025-04-10T03:00:00Z"
                }
            ]
        });

        let state = migrate_document(raw);
        assert_eq!(state.account, Account::default());
        assert_eq!(state.income, Income::default());
        assert!(state.categories.is_empty());
        // The undecodable transaction is dropped, the valid one kept
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.transactions[0].amount, Yen::new(999));
    }

    #[test]
    fn test_current_version_document_passes_through() {
        let state = PersistedState::seed();
        let raw = serde_json::to_value(&state).unwrap();

        let migrated = migrate_document(raw);
        assert_eq!(migrated, state);
    }
}
