pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod widget;

use chrono::{DateTime, Utc};
use log::warn;

use models::{
    analytics::{CategorySummary, FormattedBalance, MonthlyTotals},
    budget::Budget,
    category::Category,
    checklist::ChecklistItem,
    ledger::Ledger,
    transaction::{Transaction, TransactionKind},
};
use services::{
    analytics_service::AnalyticsService, budget_service::BudgetService,
    category_service::CategoryService, checklist_service::ChecklistService,
    transaction_service::TransactionService,
};
use storage::{
    blobs::BlobStore,
    manager::DocumentStore,
    paths::{Collection, StorageConfig},
    shared::SharedStore,
};
use widget::WidgetSnapshotExporter;

/// Which collection a mutation touched. Observers receive one event per
/// changed collection; a cascading category delete fires two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Transactions,
    Categories,
    Budgets,
    ShoppingItems,
    TodoItems,
}

type ChangeListener = Box<dyn Fn(ChangeEvent)>;

/// Main entry point for the Expense Tracker core library.
///
/// Owns the five in-memory collections for the lifetime of the process and
/// keeps them consistent: every mutation validates, mutates in memory,
/// re-sorts where applicable, persists the full collection best-effort, and
/// re-exports the widget snapshot when transactions changed. In-memory
/// state is the source of truth; disk is a mirror, and persistence failures
/// never surface to callers (they are logged and swallowed). All operations
/// run on the calling thread — the manager is single-threaded by design.
#[must_use]
pub struct ExpenseDataManager {
    ledger: Ledger,
    transaction_service: TransactionService,
    category_service: CategoryService,
    budget_service: BudgetService,
    checklist_service: ChecklistService,
    analytics_service: AnalyticsService,
    documents: DocumentStore,
    blobs: BlobStore,
    exporter: WidgetSnapshotExporter,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for ExpenseDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseDataManager")
            .field("transactions", &self.ledger.transactions.len())
            .field("categories", &self.ledger.categories.len())
            .field("budgets", &self.ledger.budgets.len())
            .field("shopping_items", &self.ledger.shopping_items.len())
            .field("todo_items", &self.ledger.todo_items.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ExpenseDataManager {
    /// Load all collections from disk and run the startup protocol:
    /// categories are seeded with the default set when empty or absent,
    /// the other collections default to empty, and an initial widget
    /// snapshot is exported.
    pub fn new(config: StorageConfig) -> Self {
        let documents = DocumentStore::new(&config);
        let blobs = BlobStore::new(&config);
        let exporter = WidgetSnapshotExporter::new(SharedStore::new(config.shared_dir.clone()));

        let transaction_service = TransactionService::new();
        let category_service = CategoryService::new();

        let mut ledger = Ledger {
            categories: documents.load(Collection::Categories),
            transactions: documents.load(Collection::Transactions),
            budgets: documents.load(Collection::Budgets),
            shopping_items: documents.load(Collection::ShoppingItems),
            todo_items: documents.load(Collection::TodoItems),
        };

        if ledger.categories.is_empty() {
            category_service.seed_defaults(&mut ledger);
            if let Err(e) = documents.save(Collection::Categories, &ledger.categories) {
                warn!("failed to persist seeded categories: {e}");
            }
        }

        TransactionService::sort(&mut ledger);
        BudgetService::sort(&mut ledger);

        let manager = Self {
            ledger,
            transaction_service,
            category_service,
            budget_service: BudgetService::new(),
            checklist_service: ChecklistService::new(),
            analytics_service: AnalyticsService::new(),
            documents,
            blobs,
            exporter,
            listeners: Vec::new(),
        };
        manager.export_widget_snapshot();
        manager
    }

    // ── Observability ───────────────────────────────────────────────

    /// Register a change listener. Listeners are called synchronously on
    /// the mutating thread, once per changed collection.
    pub fn subscribe(&mut self, listener: impl Fn(ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: ChangeEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Add a transaction; the collection stays sorted by date descending.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transaction_service.add(&mut self.ledger, transaction);
        self.persist_transactions();
        self.notify(ChangeEvent::Transactions);
    }

    /// Update a transaction matched by id; unknown ids are silent no-ops.
    /// A superseded photo blob is deleted.
    pub fn update_transaction(&mut self, transaction: Transaction) {
        let new_photo = transaction.photo_filename.clone();
        let Some(old) = self.transaction_service.update(&mut self.ledger, transaction) else {
            return;
        };
        if let Some(old_photo) = old.photo_filename {
            if Some(&old_photo) != new_photo.as_ref() {
                self.blobs.delete(&old_photo);
            }
        }
        self.persist_transactions();
        self.notify(ChangeEvent::Transactions);
    }

    /// Remove a transaction by id, cascading to its photo blob.
    pub fn remove_transaction(&mut self, id: &str) {
        let Some(removed) = self.transaction_service.remove(&mut self.ledger, id) else {
            return;
        };
        if let Some(photo) = removed.photo_filename {
            self.blobs.delete(&photo);
        }
        self.persist_transactions();
        self.notify(ChangeEvent::Transactions);
    }

    /// Remove transactions by index set (as presented, date-descending),
    /// cascading to their photo blobs.
    pub fn remove_transactions_at(&mut self, indices: &[usize]) {
        let removed = self.transaction_service.remove_at(&mut self.ledger, indices);
        if removed.is_empty() {
            return;
        }
        for transaction in removed {
            if let Some(photo) = transaction.photo_filename {
                self.blobs.delete(&photo);
            }
        }
        self.persist_transactions();
        self.notify(ChangeEvent::Transactions);
    }

    /// Empty the transaction collection, remove its document, and sweep
    /// all referenced photo blobs.
    pub fn clear_all_transactions(&mut self) {
        for transaction in &self.ledger.transactions {
            if let Some(photo) = &transaction.photo_filename {
                self.blobs.delete(photo);
            }
        }
        self.ledger.transactions.clear();
        self.documents.remove(Collection::Transactions);
        self.export_widget_snapshot();
        self.notify(ChangeEvent::Transactions);
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Transactions of a given kind; `All` returns everything.
    #[must_use]
    pub fn get_transactions_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transaction_service.by_kind(&self.ledger, kind)
    }

    /// Transactions dated within `[from, to]` inclusive.
    #[must_use]
    pub fn get_transactions_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&Transaction> {
        self.transaction_service.in_range(&self.ledger, from, to)
    }

    /// Transactions dated inside a given calendar month.
    #[must_use]
    pub fn get_transactions_for_month(&self, year: i32, month: u32) -> Vec<&Transaction> {
        self.transaction_service.for_month(&self.ledger, year, month)
    }

    /// Case-insensitive remark search; an empty query returns everything.
    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        self.transaction_service.search(&self.ledger, query)
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_category(&mut self, category: Category) {
        self.category_service.add(&mut self.ledger, category);
        self.persist_categories();
        self.notify(ChangeEvent::Categories);
    }

    /// Update a category matched by id. The sentinel is immutable, and
    /// unknown ids are silent no-ops.
    pub fn update_category(&mut self, category: Category) {
        if self.category_service.update(&mut self.ledger, category) {
            self.persist_categories();
            self.notify(ChangeEvent::Categories);
        }
    }

    /// Remove a category. A no-op for the sentinel; otherwise every
    /// referencing transaction is reassigned to the sentinel first, and
    /// both collections are persisted.
    pub fn remove_category(&mut self, id: &str) {
        let Some(_reassigned) = self.category_service.remove(&mut self.ledger, id) else {
            return;
        };
        self.persist_categories();
        self.persist_transactions();
        self.notify(ChangeEvent::Categories);
        self.notify(ChangeEvent::Transactions);
    }

    /// Remove the category document and reseed the default set.
    pub fn clear_all_categories(&mut self) {
        self.documents.remove(Collection::Categories);
        self.category_service.seed_defaults(&mut self.ledger);
        self.persist_categories();
        self.notify(ChangeEvent::Categories);
    }

    #[must_use]
    pub fn get_categories(&self) -> &[Category] {
        &self.ledger.categories
    }

    /// Categories matching a kind exactly, plus the sentinel `All` kind.
    #[must_use]
    pub fn get_categories_for(&self, kind: TransactionKind) -> Vec<&Category> {
        self.category_service.for_kind(&self.ledger, kind)
    }

    /// Resolve a possibly-absent category id; absent or unresolvable ids
    /// yield the sentinel, so the result is always a valid category.
    #[must_use]
    pub fn get_category(&self, id: Option<&str>) -> Category {
        self.category_service.resolve(&self.ledger, id)
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Add a budget; the list stays sorted by end date descending.
    pub fn add_budget(&mut self, budget: Budget) {
        self.budget_service.add(&mut self.ledger, budget);
        self.persist_budgets();
        self.notify(ChangeEvent::Budgets);
    }

    pub fn update_budget(&mut self, budget: Budget) {
        if self.budget_service.update(&mut self.ledger, budget) {
            self.persist_budgets();
            self.notify(ChangeEvent::Budgets);
        }
    }

    pub fn remove_budget(&mut self, id: &str) {
        if self.budget_service.remove(&mut self.ledger, id) {
            self.persist_budgets();
            self.notify(ChangeEvent::Budgets);
        }
    }

    #[must_use]
    pub fn get_budgets(&self) -> &[Budget] {
        &self.ledger.budgets
    }

    /// Sum of expense transactions inside the budget window, recomputed on
    /// every call.
    #[must_use]
    pub fn spent_amount(&self, budget: &Budget) -> f64 {
        self.budget_service.spent_amount(&self.ledger, budget)
    }

    // ── Shopping list ───────────────────────────────────────────────

    /// Add a shopping item by name (starts incomplete); returns its id.
    pub fn add_shopping_item(&mut self, name: impl Into<String>) -> String {
        let id = self
            .checklist_service
            .add(&mut self.ledger.shopping_items, name);
        self.persist_shopping_items();
        self.notify(ChangeEvent::ShoppingItems);
        id
    }

    pub fn update_shopping_item(&mut self, item: ChecklistItem) {
        if self
            .checklist_service
            .update(&mut self.ledger.shopping_items, item)
        {
            self.persist_shopping_items();
            self.notify(ChangeEvent::ShoppingItems);
        }
    }

    pub fn remove_shopping_items_at(&mut self, indices: &[usize]) {
        if self
            .checklist_service
            .remove_at(&mut self.ledger.shopping_items, indices)
            > 0
        {
            self.persist_shopping_items();
            self.notify(ChangeEvent::ShoppingItems);
        }
    }

    #[must_use]
    pub fn get_shopping_items(&self) -> &[ChecklistItem] {
        &self.ledger.shopping_items
    }

    // ── Todo list ───────────────────────────────────────────────────

    /// Add a todo item by name (starts incomplete); returns its id.
    pub fn add_todo_item(&mut self, name: impl Into<String>) -> String {
        let id = self.checklist_service.add(&mut self.ledger.todo_items, name);
        self.persist_todo_items();
        self.notify(ChangeEvent::TodoItems);
        id
    }

    pub fn update_todo_item(&mut self, item: ChecklistItem) {
        if self
            .checklist_service
            .update(&mut self.ledger.todo_items, item)
        {
            self.persist_todo_items();
            self.notify(ChangeEvent::TodoItems);
        }
    }

    pub fn remove_todo_items_at(&mut self, indices: &[usize]) {
        if self
            .checklist_service
            .remove_at(&mut self.ledger.todo_items, indices)
            > 0
        {
            self.persist_todo_items();
            self.notify(ChangeEvent::TodoItems);
        }
    }

    #[must_use]
    pub fn get_todo_items(&self) -> &[ChecklistItem] {
        &self.ledger.todo_items
    }

    // ── Aggregates ──────────────────────────────────────────────────

    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.analytics_service.total_income(&self.ledger)
    }

    #[must_use]
    pub fn total_expense(&self) -> f64 {
        self.analytics_service.total_expense(&self.ledger)
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.analytics_service.balance(&self.ledger)
    }

    #[must_use]
    pub fn current_month_income(&self) -> f64 {
        self.month_income(Utc::now())
    }

    #[must_use]
    pub fn current_month_expense(&self) -> f64 {
        self.month_expense(Utc::now())
    }

    #[must_use]
    pub fn current_month_balance(&self) -> f64 {
        self.month_balance(Utc::now())
    }

    /// Income inside the calendar month containing `reference`.
    #[must_use]
    pub fn month_income(&self, reference: DateTime<Utc>) -> f64 {
        self.analytics_service.month_income(&self.ledger, reference)
    }

    /// Expense inside the calendar month containing `reference`.
    #[must_use]
    pub fn month_expense(&self, reference: DateTime<Utc>) -> f64 {
        self.analytics_service.month_expense(&self.ledger, reference)
    }

    /// Balance of the calendar month containing `reference`.
    #[must_use]
    pub fn month_balance(&self, reference: DateTime<Utc>) -> f64 {
        self.analytics_service.month_balance(&self.ledger, reference)
    }

    /// Income, expense, and balance of one calendar month.
    #[must_use]
    pub fn month_totals(&self, reference: DateTime<Utc>) -> MonthlyTotals {
        self.analytics_service.month_totals(&self.ledger, reference)
    }

    /// Inclusive bounds of the current calendar month.
    #[must_use]
    pub fn current_month_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        AnalyticsService::month_window(Utc::now())
    }

    /// `Jan 01 - Jan 31` style rendering of the current month window.
    #[must_use]
    pub fn current_month_range_text(&self) -> String {
        AnalyticsService::month_window_text(Utc::now())
    }

    /// Category-grouped sums for charting, descending by total.
    #[must_use]
    pub fn category_summaries(
        &self,
        kind: TransactionKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<CategorySummary> {
        self.analytics_service
            .category_summaries(&self.ledger, kind, from, to)
    }

    /// Overall balance rendered for display with a sign and tone.
    #[must_use]
    pub fn formatted_balance(&self) -> FormattedBalance {
        FormattedBalance::from_balance(self.balance())
    }

    /// Current-month balance rendered for display.
    #[must_use]
    pub fn formatted_current_month_balance(&self) -> FormattedBalance {
        FormattedBalance::from_balance(self.current_month_balance())
    }

    // ── Photo blobs ─────────────────────────────────────────────────

    /// Store photo bytes, returning the generated filename to reference
    /// from a transaction. Failures are logged and yield `None`.
    pub fn save_image(&self, data: &[u8]) -> Option<String> {
        match self.blobs.save(data) {
            Ok(filename) => Some(filename),
            Err(e) => {
                warn!("failed to save image blob: {e}");
                None
            }
        }
    }

    /// Read photo bytes back by filename.
    #[must_use]
    pub fn load_image(&self, filename: Option<&str>) -> Option<Vec<u8>> {
        self.blobs.load(filename?)
    }

    /// Best-effort photo removal.
    pub fn delete_image(&self, filename: Option<&str>) {
        if let Some(filename) = filename {
            self.blobs.delete(filename);
        }
    }

    // ── Widget snapshot ─────────────────────────────────────────────

    /// Re-export the widget snapshot outside the normal mutation flow.
    pub fn force_widget_sync(&self) {
        self.export_widget_snapshot();
    }

    // ── Internal ────────────────────────────────────────────────────

    fn persist_transactions(&self) {
        if let Err(e) = self
            .documents
            .save(Collection::Transactions, &self.ledger.transactions)
        {
            warn!("failed to persist transactions, in-memory state retained: {e}");
        }
        self.export_widget_snapshot();
    }

    fn persist_categories(&self) {
        if let Err(e) = self
            .documents
            .save(Collection::Categories, &self.ledger.categories)
        {
            warn!("failed to persist categories, in-memory state retained: {e}");
        }
    }

    fn persist_budgets(&self) {
        if let Err(e) = self.documents.save(Collection::Budgets, &self.ledger.budgets) {
            warn!("failed to persist budgets, in-memory state retained: {e}");
        }
    }

    fn persist_shopping_items(&self) {
        if let Err(e) = self
            .documents
            .save(Collection::ShoppingItems, &self.ledger.shopping_items)
        {
            warn!("failed to persist shopping items, in-memory state retained: {e}");
        }
    }

    fn persist_todo_items(&self) {
        if let Err(e) = self
            .documents
            .save(Collection::TodoItems, &self.ledger.todo_items)
        {
            warn!("failed to persist todo items, in-memory state retained: {e}");
        }
    }

    fn export_widget_snapshot(&self) {
        self.exporter
            .export(&self.ledger.transactions, &self.ledger.categories);
    }
}
