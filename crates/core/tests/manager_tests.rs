// ═══════════════════════════════════════════════════════════════════
// Manager Tests — ExpenseDataManager end to end against real storage
// ═══════════════════════════════════════════════════════════════════

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use expense_tracker_core::models::budget::Budget;
use expense_tracker_core::models::category::{Category, UNCATEGORIZED_ID};
use expense_tracker_core::models::color::ColorComponents;
use expense_tracker_core::models::transaction::{Transaction, TransactionKind};
use expense_tracker_core::storage::paths::{Collection, StorageConfig};
use expense_tracker_core::storage::shared::SharedStore;
use expense_tracker_core::widget::{WidgetRecord, WIDGET_SNAPSHOT_KEY};
use expense_tracker_core::{ChangeEvent, ExpenseDataManager};
use tempfile::TempDir;

fn config(dir: &TempDir) -> StorageConfig {
    StorageConfig::new(dir.path().join("documents"), dir.path().join("shared"))
}

fn date(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn expense(remark: &str, amount: f64, d: chrono::DateTime<Utc>) -> Transaction {
    Transaction::new(remark, amount, d, TransactionKind::Expense)
}

fn income(remark: &str, amount: f64, d: chrono::DateTime<Utc>) -> Transaction {
    Transaction::new(remark, amount, d, TransactionKind::Income)
}

fn widget_snapshot(dir: &TempDir) -> Vec<WidgetRecord> {
    let store = SharedStore::new(dir.path().join("shared"));
    let bytes = store.get(WIDGET_SNAPSHOT_KEY).expect("snapshot written");
    serde_json::from_slice(&bytes).expect("snapshot decodes")
}

// ═══════════════════════════════════════════════════════════════════
// Startup
// ═══════════════════════════════════════════════════════════════════

mod startup {
    use super::*;

    #[test]
    fn first_run_seeds_default_categories() {
        let dir = TempDir::new().unwrap();
        let manager = ExpenseDataManager::new(config(&dir));

        let categories = manager.get_categories();
        assert_eq!(categories.len(), 11);
        assert_eq!(categories[0].id, UNCATEGORIZED_ID);
        assert!(categories[0].is_default);
        assert!(manager.get_transactions().is_empty());
        assert!(manager.get_budgets().is_empty());
        assert!(manager.get_shopping_items().is_empty());
        assert!(manager.get_todo_items().is_empty());
    }

    #[test]
    fn seeding_is_idempotent_across_restarts() {
        let dir = TempDir::new().unwrap();
        {
            let _first = ExpenseDataManager::new(config(&dir));
        }
        let second = ExpenseDataManager::new(config(&dir));
        assert_eq!(second.get_categories().len(), 11);
    }

    #[test]
    fn initial_widget_snapshot_is_exported() {
        let dir = TempDir::new().unwrap();
        let _manager = ExpenseDataManager::new(config(&dir));
        assert!(widget_snapshot(&dir).is_empty());
    }

    #[test]
    fn corrupt_transaction_document_starts_empty_but_keeps_running() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        std::fs::create_dir_all(&cfg.documents_dir).unwrap();
        std::fs::write(cfg.document_path(Collection::Transactions), b"%%%").unwrap();

        let mut manager = ExpenseDataManager::new(cfg);
        assert!(manager.get_transactions().is_empty());

        // Still fully usable afterwards.
        manager.add_transaction(expense("Lunch", 100.0, date(2025, 1, 15)));
        assert_eq!(manager.transaction_count(), 1);
    }

    #[test]
    fn restart_restores_all_collections() {
        let dir = TempDir::new().unwrap();
        {
            let mut manager = ExpenseDataManager::new(config(&dir));
            manager.add_transaction(expense("Lunch", 100.0, date(2025, 1, 15)));
            manager.add_transaction(income("Pay", 50000.0, date(2025, 1, 5)));
            manager.add_budget(Budget::new("jan", 1000.0, date(2025, 1, 1), date(2025, 1, 31)));
            manager.add_shopping_item("Milk");
            manager.add_todo_item("Taxes");
        }

        let manager = ExpenseDataManager::new(config(&dir));
        assert_eq!(manager.transaction_count(), 2);
        assert_eq!(manager.get_budgets().len(), 1);
        assert_eq!(manager.get_shopping_items().len(), 1);
        assert_eq!(manager.get_todo_items().len(), 1);

        // Sorted newest-first after reload too.
        assert_eq!(manager.get_transactions()[0].remark, "Lunch");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction mutations
// ═══════════════════════════════════════════════════════════════════

mod transactions {
    use super::*;

    #[test]
    fn collection_stays_sorted_after_add_and_update() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        manager.add_transaction(expense("mid", 1.0, date(2025, 1, 10)));
        manager.add_transaction(expense("old", 1.0, date(2025, 1, 1)));
        manager.add_transaction(expense("new", 1.0, date(2025, 1, 20)));

        let dates: Vec<_> = manager.get_transactions().iter().map(|t| t.date).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));

        let mut moved = manager.get_transactions()[2].clone(); // "old"
        moved.date = date(2025, 1, 25);
        manager.update_transaction(moved);

        let dates: Vec<_> = manager.get_transactions().iter().map(|t| t.date).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(manager.get_transactions()[0].remark, "old");
    }

    #[test]
    fn update_with_unknown_id_is_a_silent_noop() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_transaction(expense("keep", 1.0, date(2025, 1, 10)));

        manager.update_transaction(expense("ghost", 9.0, date(2025, 1, 11)));
        assert_eq!(manager.transaction_count(), 1);
        assert_eq!(manager.get_transactions()[0].remark, "keep");
    }

    #[test]
    fn remove_by_index_set() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        for day in [5, 10, 15] {
            manager.add_transaction(expense("t", 1.0, date(2025, 1, day)));
        }

        manager.remove_transactions_at(&[0, 2]);
        assert_eq!(manager.transaction_count(), 1);
        assert_eq!(manager.get_transactions()[0].date, date(2025, 1, 10));
    }

    #[test]
    fn clear_all_transactions_removes_document() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let mut manager = ExpenseDataManager::new(cfg.clone());
        manager.add_transaction(expense("t", 1.0, date(2025, 1, 5)));
        assert!(cfg.document_path(Collection::Transactions).exists());

        manager.clear_all_transactions();
        assert_eq!(manager.transaction_count(), 0);
        assert!(!cfg.document_path(Collection::Transactions).exists());
        assert!(widget_snapshot(&dir).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Category rules and cascade
// ═══════════════════════════════════════════════════════════════════

mod categories {
    use super::*;

    #[test]
    fn delete_cascade_reassigns_to_sentinel_and_keeps_totals() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let food = Category::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork");
        let food_id = food.id.clone();
        manager.add_category(food);

        manager.add_transaction(
            expense("Lunch", 100.0, date(2025, 1, 15)).with_category(&food_id),
        );
        assert_eq!(manager.month_expense(date(2025, 1, 1)), 100.0);

        manager.remove_category(&food_id);

        let t = &manager.get_transactions()[0];
        assert_eq!(t.category_id, None);
        assert_eq!(manager.get_category(t.category_id.as_deref()).id, UNCATEGORIZED_ID);
        // Aggregates are unaffected by recategorization.
        assert_eq!(manager.month_expense(date(2025, 1, 1)), 100.0);
    }

    #[test]
    fn cascade_survives_restart() {
        let dir = TempDir::new().unwrap();
        let food_id;
        {
            let mut manager = ExpenseDataManager::new(config(&dir));
            let food =
                Category::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork");
            food_id = food.id.clone();
            manager.add_category(food);
            manager.add_transaction(
                expense("Lunch", 100.0, date(2025, 1, 15)).with_category(&food_id),
            );
            manager.remove_category(&food_id);
        }

        let manager = ExpenseDataManager::new(config(&dir));
        assert!(manager.get_categories().iter().all(|c| c.id != food_id));
        assert!(manager
            .get_transactions()
            .iter()
            .all(|t| t.category_id.is_none()));
    }

    #[test]
    fn sentinel_cannot_be_deleted_or_updated() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        manager.remove_category(UNCATEGORIZED_ID);
        assert_eq!(manager.get_categories().len(), 11);

        let mut hijack = Category::uncategorized();
        hijack.name = "Hijacked".to_string();
        manager.update_category(hijack);
        assert_eq!(manager.get_category(None).name, "Uncategorized");
        assert_eq!(manager.get_category(None).kind, TransactionKind::All);
    }

    #[test]
    fn categories_for_kind_include_sentinel() {
        let dir = TempDir::new().unwrap();
        let manager = ExpenseDataManager::new(config(&dir));

        let income = manager.get_categories_for(TransactionKind::Income);
        assert!(income.iter().any(|c| c.id == UNCATEGORIZED_ID));
        assert!(income
            .iter()
            .all(|c| c.kind == TransactionKind::Income || c.kind == TransactionKind::All));
    }

    #[test]
    fn clear_all_categories_reseeds_defaults() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_category(Category::new(
            "Custom",
            ColorComponents::PINK,
            TransactionKind::Expense,
            "star",
        ));
        assert_eq!(manager.get_categories().len(), 12);

        manager.clear_all_categories();
        assert_eq!(manager.get_categories().len(), 11);
        assert_eq!(manager.get_categories()[0].id, UNCATEGORIZED_ID);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Aggregates
// ═══════════════════════════════════════════════════════════════════

mod aggregates {
    use super::*;

    #[test]
    fn month_balance_identity_holds() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        manager.add_transaction(income("Pay", 50000.0, date(2025, 1, 5)));
        manager.add_transaction(expense("Rent", 18000.0, date(2025, 1, 6)));
        manager.add_transaction(expense("Feb", 999.0, date(2025, 2, 6)));

        let reference = date(2025, 1, 20);
        assert_eq!(
            manager.month_balance(reference),
            manager.month_income(reference) - manager.month_expense(reference)
        );
        assert_eq!(manager.month_income(reference), 50000.0);
        assert_eq!(manager.month_expense(reference), 18000.0);

        let totals = manager.month_totals(reference);
        assert_eq!(totals.balance, 32000.0);
    }

    #[test]
    fn overall_balance_identity_holds() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_transaction(income("Pay", 1000.0, date(2025, 1, 5)));
        manager.add_transaction(expense("Stuff", 250.0, date(2025, 3, 5)));

        assert_eq!(manager.balance(), manager.total_income() - manager.total_expense());
        assert_eq!(manager.balance(), 750.0);
    }

    #[test]
    fn budget_spent_amount_example_scenario() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let budget = Budget::new("jan", 1000.0, date(2025, 1, 1), date(2025, 1, 31));
        manager.add_budget(budget.clone());

        manager.add_transaction(expense("a", 300.0, date(2025, 1, 10)));
        manager.add_transaction(expense("b", 400.0, date(2025, 1, 20)));
        manager.add_transaction(expense("outside", 500.0, date(2025, 2, 10)));

        assert_eq!(manager.spent_amount(&budget), 700.0);

        // Fresh recomputation on every call, no explicit refresh needed.
        manager.add_transaction(expense("c", 100.0, date(2025, 1, 25)));
        assert_eq!(manager.spent_amount(&budget), 800.0);
    }

    #[test]
    fn budgets_listed_by_end_date_descending() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        manager.add_budget(Budget::new("jan", 1.0, date(2025, 1, 1), date(2025, 1, 31)));
        manager.add_budget(Budget::new("mar", 1.0, date(2025, 3, 1), date(2025, 3, 31)));
        manager.add_budget(Budget::new("feb", 1.0, date(2025, 2, 1), date(2025, 2, 28)));

        let names: Vec<_> = manager.get_budgets().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["mar", "feb", "jan"]);
    }

    #[test]
    fn category_summaries_for_charting() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let food = Category::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork");
        let food_id = food.id.clone();
        manager.add_category(food);

        manager.add_transaction(expense("lunch", 100.0, date(2025, 1, 5)).with_category(&food_id));
        manager.add_transaction(expense("dinner", 300.0, date(2025, 1, 6)).with_category(&food_id));
        manager.add_transaction(expense("misc", 50.0, date(2025, 1, 7)));

        let summaries = manager.category_summaries(
            TransactionKind::Expense,
            date(2025, 1, 1),
            date(2025, 1, 31),
        );
        assert_eq!(summaries[0].name, "Food");
        assert_eq!(summaries[0].total, 400.0);
        assert_eq!(summaries[1].category_id, UNCATEGORIZED_ID);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Checklists
// ═══════════════════════════════════════════════════════════════════

mod checklists {
    use super::*;

    #[test]
    fn shopping_and_todo_lists_are_independent() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let mut manager = ExpenseDataManager::new(cfg.clone());

        manager.add_shopping_item("Milk");
        manager.add_todo_item("Taxes");

        assert_eq!(manager.get_shopping_items().len(), 1);
        assert_eq!(manager.get_todo_items().len(), 1);
        assert!(cfg.document_path(Collection::ShoppingItems).exists());
        assert!(cfg.document_path(Collection::TodoItems).exists());

        manager.remove_shopping_items_at(&[0]);
        assert!(manager.get_shopping_items().is_empty());
        assert_eq!(manager.get_todo_items().len(), 1);
    }

    #[test]
    fn toggle_completion_via_update() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_shopping_item("Milk");

        let mut done = manager.get_shopping_items()[0].clone();
        done.is_completed = true;
        manager.update_shopping_item(done);

        assert!(manager.get_shopping_items()[0].is_completed);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Widget snapshot export
// ═══════════════════════════════════════════════════════════════════

mod widget_export {
    use super::*;

    #[test]
    fn snapshot_carries_resolved_category_data() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let food = Category::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork");
        let food_id = food.id.clone();
        manager.add_category(food);
        manager.add_transaction(expense("Lunch", 100.0, date(2025, 1, 15)).with_category(&food_id));

        let records = widget_snapshot(&dir);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].remark, "Lunch");
        assert_eq!(records[0].amount, 100.0);
        assert_eq!(records[0].kind, TransactionKind::Expense);
        assert_eq!(records[0].category_name, "Food");
        assert_eq!(records[0].category_color, ColorComponents::RED);
    }

    #[test]
    fn uncategorized_transactions_export_sentinel_name() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_transaction(expense("Misc", 10.0, date(2025, 1, 15)));

        let records = widget_snapshot(&dir);
        assert_eq!(records[0].category_name, "Uncategorized");
    }

    #[test]
    fn snapshot_refreshes_after_every_transaction_mutation() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        manager.add_transaction(expense("a", 10.0, date(2025, 1, 15)));
        assert_eq!(widget_snapshot(&dir).len(), 1);

        let id = manager.get_transactions()[0].id.clone();
        manager.remove_transaction(&id);
        assert!(widget_snapshot(&dir).is_empty());
    }

    #[test]
    fn wire_format_matches_the_widget_contract() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_transaction(expense("Lunch", 100.0, date(2025, 1, 15)));

        let store = SharedStore::new(dir.path().join("shared"));
        let bytes = store.get(WIDGET_SNAPSHOT_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let record = &value.as_array().unwrap()[0];
        assert!(record["id"].is_string());
        assert_eq!(record["type"], "expense");
        assert_eq!(record["categoryName"], "Uncategorized");
        assert!(record["categoryColor"]["red"].is_number());
    }

    #[test]
    fn force_widget_sync_rewrites_the_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));
        manager.add_transaction(expense("a", 10.0, date(2025, 1, 15)));

        // Clobber the snapshot, then force a resync.
        let store = SharedStore::new(dir.path().join("shared"));
        store.set(WIDGET_SNAPSHOT_KEY, b"[]").unwrap();

        manager.force_widget_sync();
        assert_eq!(widget_snapshot(&dir).len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Photo blobs
// ═══════════════════════════════════════════════════════════════════

mod photos {
    use super::*;

    #[test]
    fn save_then_load_image() {
        let dir = TempDir::new().unwrap();
        let manager = ExpenseDataManager::new(config(&dir));

        let filename = manager.save_image(b"jpeg bytes").unwrap();
        assert_eq!(manager.load_image(Some(&filename)).unwrap(), b"jpeg bytes");
        assert!(manager.load_image(None).is_none());

        manager.delete_image(Some(&filename));
        assert!(manager.load_image(Some(&filename)).is_none());
    }

    #[test]
    fn removing_a_transaction_deletes_its_photo() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let filename = manager.save_image(b"receipt").unwrap();
        manager.add_transaction(
            expense("Lunch", 100.0, date(2025, 1, 15)).with_photo(&filename),
        );

        let id = manager.get_transactions()[0].id.clone();
        manager.remove_transaction(&id);
        assert!(manager.load_image(Some(&filename)).is_none());
    }

    #[test]
    fn replacing_a_photo_deletes_the_superseded_blob() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let old_photo = manager.save_image(b"old").unwrap();
        manager.add_transaction(
            expense("Lunch", 100.0, date(2025, 1, 15)).with_photo(&old_photo),
        );

        let new_photo = manager.save_image(b"new").unwrap();
        let mut updated = manager.get_transactions()[0].clone();
        updated.photo_filename = Some(new_photo.clone());
        manager.update_transaction(updated);

        assert!(manager.load_image(Some(&old_photo)).is_none());
        assert_eq!(manager.load_image(Some(&new_photo)).unwrap(), b"new");
    }

    #[test]
    fn keeping_the_same_photo_on_update_preserves_it() {
        let dir = TempDir::new().unwrap();
        let mut manager = ExpenseDataManager::new(config(&dir));

        let photo = manager.save_image(b"receipt").unwrap();
        manager.add_transaction(expense("Lunch", 100.0, date(2025, 1, 15)).with_photo(&photo));

        let mut updated = manager.get_transactions()[0].clone();
        updated.remark = "Late lunch".to_string();
        manager.update_transaction(updated);

        assert_eq!(manager.load_image(Some(&photo)).unwrap(), b"receipt");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Change notifications
// ═══════════════════════════════════════════════════════════════════

mod notifications {
    use super::*;

    fn recording_manager(dir: &TempDir) -> (ExpenseDataManager, Rc<RefCell<Vec<ChangeEvent>>>) {
        let mut manager = ExpenseDataManager::new(config(dir));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        manager.subscribe(move |event| sink.borrow_mut().push(event));
        (manager, events)
    }

    #[test]
    fn each_mutation_notifies_its_collection() {
        let dir = TempDir::new().unwrap();
        let (mut manager, events) = recording_manager(&dir);

        manager.add_transaction(expense("t", 1.0, date(2025, 1, 5)));
        manager.add_budget(Budget::new("b", 1.0, date(2025, 1, 1), date(2025, 1, 31)));
        manager.add_shopping_item("Milk");
        manager.add_todo_item("Taxes");

        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::Transactions,
                ChangeEvent::Budgets,
                ChangeEvent::ShoppingItems,
                ChangeEvent::TodoItems,
            ]
        );
    }

    #[test]
    fn cascading_category_delete_fires_two_events() {
        let dir = TempDir::new().unwrap();
        let (mut manager, events) = recording_manager(&dir);

        let food = Category::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork");
        let food_id = food.id.clone();
        manager.add_category(food);
        events.borrow_mut().clear();

        manager.remove_category(&food_id);
        assert_eq!(
            *events.borrow(),
            vec![ChangeEvent::Categories, ChangeEvent::Transactions]
        );
    }

    #[test]
    fn noop_mutations_do_not_notify() {
        let dir = TempDir::new().unwrap();
        let (mut manager, events) = recording_manager(&dir);

        manager.update_transaction(expense("ghost", 1.0, date(2025, 1, 5)));
        manager.remove_category(UNCATEGORIZED_ID);
        manager.remove_budget("missing");
        manager.remove_shopping_items_at(&[42]);

        assert!(events.borrow().is_empty());
    }
}
