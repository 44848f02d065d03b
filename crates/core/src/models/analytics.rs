use serde::{Deserialize, Serialize};

use super::color::ColorComponents;
use super::transaction::format_currency;

/// Income, expense, and balance over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    /// income - expense
    pub balance: f64,
}

/// Per-category total for charting, produced by grouping filtered
/// transactions by their resolved category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Resolved category id (the sentinel id for uncategorized transactions)
    pub category_id: String,
    pub name: String,
    pub color: ColorComponents,
    /// Summed magnitude of the grouped transactions
    pub total: f64,
}

/// Visual tone of a formatted balance, decided by its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceTone {
    Positive,
    Negative,
    Neutral,
}

/// A balance rendered for display: signed text plus a tone hint.
/// The presentation layer maps the tone to an actual color.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedBalance {
    pub text: String,
    pub tone: BalanceTone,
}

impl FormattedBalance {
    /// Format a signed balance: `+NT$500` / `-NT$120` / `NT$0`.
    #[must_use]
    pub fn from_balance(balance: f64) -> Self {
        let text = format_currency(balance);
        if balance > 0.0 {
            Self {
                text: format!("+{text}"),
                tone: BalanceTone::Positive,
            }
        } else if balance < 0.0 {
            Self {
                text: format!("-{text}"),
                tone: BalanceTone::Negative,
            }
        } else {
            Self {
                text,
                tone: BalanceTone::Neutral,
            }
        }
    }
}
