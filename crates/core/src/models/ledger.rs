use super::budget::Budget;
use super::category::Category;
use super::checklist::ChecklistItem;
use super::transaction::Transaction;

/// The in-memory data container: all five collections owned exclusively by
/// the `ExpenseDataManager` for the lifetime of the process.
///
/// Unlike the persisted form (one document per collection), the ledger is
/// never serialized as a whole; it only exists in memory, and in-memory
/// state is the source of truth for the running process.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// All transactions, kept sorted by date descending after any mutation
    pub transactions: Vec<Transaction>,

    /// All categories, sentinel first after seeding
    pub categories: Vec<Category>,

    /// All budgets, kept sorted by end date descending
    pub budgets: Vec<Budget>,

    /// Shopping list items
    pub shopping_items: Vec<ChecklistItem>,

    /// Todo list items
    pub todo_items: Vec<ChecklistItem>,
}
