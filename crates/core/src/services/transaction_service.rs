use chrono::{DateTime, Datelike, Utc};

use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionKind};

/// Manages the transaction collection: sorted mutations, filters, search.
///
/// Pure business logic — no I/O. The collection invariant is that
/// transactions are always sorted by date descending after any mutation.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Add a transaction and restore the date-descending order.
    /// The amount is normalized to its magnitude; the sign lives in `kind`.
    pub fn add(&self, ledger: &mut Ledger, mut transaction: Transaction) {
        transaction.amount = transaction.amount.abs();
        ledger.transactions.push(transaction);
        Self::sort(ledger);
    }

    /// Replace the transaction with a matching id.
    /// Returns the replaced transaction, or `None` if the id is unknown.
    pub fn update(&self, ledger: &mut Ledger, mut transaction: Transaction) -> Option<Transaction> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction.id)?;
        transaction.amount = transaction.amount.abs();
        let old = std::mem::replace(&mut ledger.transactions[idx], transaction);
        Self::sort(ledger);
        Some(old)
    }

    /// Remove the transaction with a matching id, returning it.
    pub fn remove(&self, ledger: &mut Ledger, id: &str) -> Option<Transaction> {
        let idx = ledger.transactions.iter().position(|t| t.id == id)?;
        Some(ledger.transactions.remove(idx))
    }

    /// Remove transactions by index set, returning the removed ones.
    /// Out-of-range indices are ignored; removal order does not matter to
    /// the caller, so indices are processed highest-first.
    pub fn remove_at(&self, ledger: &mut Ledger, indices: &[usize]) -> Vec<Transaction> {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < ledger.transactions.len())
            .collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        sorted
            .into_iter()
            .map(|i| ledger.transactions.remove(i))
            .collect()
    }

    /// Restore the date-descending sort order.
    pub fn sort(ledger: &mut Ledger) {
        ledger.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Transactions of a given kind; `All` returns everything.
    pub fn by_kind<'a>(&self, ledger: &'a Ledger, kind: TransactionKind) -> Vec<&'a Transaction> {
        if kind == TransactionKind::All {
            return ledger.transactions.iter().collect();
        }
        ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .collect()
    }

    /// Transactions whose date falls within `[from, to]` inclusive.
    pub fn in_range<'a>(
        &self,
        ledger: &'a Ledger,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&'a Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .collect()
    }

    /// Transactions dated inside a given calendar month.
    pub fn for_month<'a>(&self, ledger: &'a Ledger, year: i32, month: u32) -> Vec<&'a Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect()
    }

    /// Case-insensitive remark search. An empty query matches everything.
    pub fn search<'a>(&self, ledger: &'a Ledger, query: &str) -> Vec<&'a Transaction> {
        if query.is_empty() {
            return ledger.transactions.iter().collect();
        }
        let q = query.to_lowercase();
        ledger
            .transactions
            .iter()
            .filter(|t| t.remark.to_lowercase().contains(&q))
            .collect()
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
