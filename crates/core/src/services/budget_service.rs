use crate::models::budget::Budget;
use crate::models::ledger::Ledger;
use crate::models::transaction::TransactionKind;

/// Manages budgets and computes their consumption from transactions.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Add a budget and restore the end-date-descending order.
    pub fn add(&self, ledger: &mut Ledger, budget: Budget) {
        ledger.budgets.push(budget);
        Self::sort(ledger);
    }

    /// Replace the budget with a matching id. Unknown ids are no-ops.
    pub fn update(&self, ledger: &mut Ledger, budget: Budget) -> bool {
        match ledger.budgets.iter().position(|b| b.id == budget.id) {
            Some(idx) => {
                ledger.budgets[idx] = budget;
                Self::sort(ledger);
                true
            }
            None => false,
        }
    }

    /// Remove the budget with a matching id.
    pub fn remove(&self, ledger: &mut Ledger, id: &str) -> bool {
        let len = ledger.budgets.len();
        ledger.budgets.retain(|b| b.id != id);
        ledger.budgets.len() != len
    }

    /// Restore the end-date-descending sort order.
    pub fn sort(ledger: &mut Ledger) {
        ledger.budgets.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    }

    /// Sum of expense transactions dated within `[start, end]` inclusive.
    /// Always recomputed, never cached, so it reflects the latest
    /// transaction state with zero staleness.
    pub fn spent_amount(&self, ledger: &Ledger, budget: &Budget) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|t| {
                t.kind == TransactionKind::Expense
                    && t.date >= budget.start_date
                    && t.date <= budget.end_date
            })
            .map(|t| t.amount)
            .sum()
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
