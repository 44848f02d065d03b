use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::collections::HashMap;

use crate::models::analytics::{CategorySummary, MonthlyTotals};
use crate::models::category::Category;
use crate::models::ledger::Ledger;
use crate::models::transaction::TransactionKind;
use crate::services::category_service;

/// Computes derived aggregates: overall and per-month totals, budget-style
/// date-window sums, and category-grouped summaries for charting.
///
/// Pure reads over the ledger — no persistence side effects, nothing cached.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    // ── Overall totals ──────────────────────────────────────────────

    pub fn total_income(&self, ledger: &Ledger) -> f64 {
        self.sum_kind(ledger, TransactionKind::Income)
    }

    pub fn total_expense(&self, ledger: &Ledger) -> f64 {
        self.sum_kind(ledger, TransactionKind::Expense)
    }

    pub fn balance(&self, ledger: &Ledger) -> f64 {
        self.total_income(ledger) - self.total_expense(ledger)
    }

    fn sum_kind(&self, ledger: &Ledger, kind: TransactionKind) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    // ── Calendar-month aggregates ───────────────────────────────────

    /// Inclusive window of the calendar month containing `reference`:
    /// first instant of the month to one second before the next month.
    pub fn month_window(reference: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let (year, month) = (reference.year(), reference.month());
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let start = Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .unwrap_or(reference);
        let next_start = Utc
            .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
            .single()
            .unwrap_or(reference);

        (start, next_start - Duration::seconds(1))
    }

    /// `Jan 01 - Jan 31` style rendering of the month window.
    pub fn month_window_text(reference: DateTime<Utc>) -> String {
        let (start, end) = Self::month_window(reference);
        format!("{} - {}", start.format("%b %d"), end.format("%b %d"))
    }

    pub fn month_income(&self, ledger: &Ledger, reference: DateTime<Utc>) -> f64 {
        self.sum_kind_in_window(ledger, TransactionKind::Income, reference)
    }

    pub fn month_expense(&self, ledger: &Ledger, reference: DateTime<Utc>) -> f64 {
        self.sum_kind_in_window(ledger, TransactionKind::Expense, reference)
    }

    pub fn month_balance(&self, ledger: &Ledger, reference: DateTime<Utc>) -> f64 {
        self.month_income(ledger, reference) - self.month_expense(ledger, reference)
    }

    pub fn month_totals(&self, ledger: &Ledger, reference: DateTime<Utc>) -> MonthlyTotals {
        let income = self.month_income(ledger, reference);
        let expense = self.month_expense(ledger, reference);
        MonthlyTotals {
            income,
            expense,
            balance: income - expense,
        }
    }

    fn sum_kind_in_window(
        &self,
        ledger: &Ledger,
        kind: TransactionKind,
        reference: DateTime<Utc>,
    ) -> f64 {
        let (start, end) = Self::month_window(reference);
        ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind && t.date >= start && t.date <= end)
            .map(|t| t.amount)
            .sum()
    }

    // ── Category summaries (charting) ───────────────────────────────

    /// Group transactions of `kind` dated within `[from, to]` inclusive by
    /// their resolved category (absent references fall back to the
    /// sentinel), sum per group, and sort descending by summed magnitude.
    /// Ties keep first-seen grouping order (the sort is stable).
    pub fn category_summaries(
        &self,
        ledger: &Ledger,
        kind: TransactionKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<CategorySummary> {
        // Group in transaction iteration order so ties stay deterministic.
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, f64> = HashMap::new();

        for transaction in &ledger.transactions {
            if transaction.date < from || transaction.date > to {
                continue;
            }
            if kind != TransactionKind::All && transaction.kind != kind {
                continue;
            }

            let category = category_service::resolve_in(
                &ledger.categories,
                transaction.category_id.as_deref(),
            );
            if !totals.contains_key(&category.id) {
                order.push(category.id.clone());
            }
            *totals.entry(category.id).or_insert(0.0) += transaction.amount;
        }

        let mut summaries: Vec<CategorySummary> = order
            .into_iter()
            .map(|id| {
                let category: Category =
                    category_service::resolve_in(&ledger.categories, Some(&id));
                CategorySummary {
                    total: totals.get(&id).copied().unwrap_or(0.0),
                    category_id: id,
                    name: category.name,
                    color: category.color,
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summaries
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
