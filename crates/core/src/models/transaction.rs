use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::ColorComponents;

/// Kind of a recorded cash movement.
///
/// `All` is reserved for the sentinel category and for "no filter" queries;
/// a stored transaction is always `Income` or `Expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    All,
}

impl TransactionKind {
    /// Human-readable name for list headers and pickers.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::All => "All",
        }
    }

    /// Fixed icon identifier per kind.
    #[must_use]
    pub fn icon_name(&self) -> &'static str {
        match self {
            TransactionKind::Income => "plus.circle.fill",
            TransactionKind::Expense => "minus.circle.fill",
            TransactionKind::All => "circle.fill",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single recorded income or expense event.
///
/// `amount` is always a non-negative magnitude; the display sign is derived
/// from `kind`, never stored as a negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier (string-typed so it round-trips through URL paths)
    pub id: String,

    /// Free-text remark
    pub remark: String,

    /// Non-negative magnitude; sign is implied by `kind`
    pub amount: f64,

    /// When the movement occurred
    pub date: DateTime<Utc>,

    /// Income or Expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Display color
    pub color: ColorComponents,

    /// Reference to a category; `None` means "uncategorized"
    #[serde(default)]
    pub category_id: Option<String>,

    /// Opaque filename of an attached photo blob
    #[serde(default)]
    pub photo_filename: Option<String>,
}

impl Transaction {
    pub fn new(
        remark: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            remark: remark.into(),
            amount,
            date,
            kind,
            color: ColorComponents::default(),
            category_id: None,
            photo_filename: None,
        }
    }

    /// Set the category reference (builder-style, used when composing a
    /// transaction from form input).
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Attach a photo blob filename (builder-style).
    #[must_use]
    pub fn with_photo(mut self, filename: impl Into<String>) -> Self {
        self.photo_filename = Some(filename.into());
        self
    }

    /// Render the magnitude with a leading sign and currency symbol,
    /// zero decimal places: `+NT$1,234` for income, `-NT$1,234` for expense.
    #[must_use]
    pub fn formatted_amount(&self) -> String {
        let prefix = match self.kind {
            TransactionKind::Expense => "-",
            _ => "+",
        };
        format!("{prefix}{}", format_currency(self.amount))
    }

    /// Fixed `yyyy/mm/dd` rendering of the occurrence date.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }
}

/// Currency symbol used by all formatted amounts.
pub const CURRENCY_SYMBOL: &str = "NT$";

/// Format a non-negative magnitude as `NT$1,234` (zero decimals, grouped
/// thousands). Negative inputs are formatted by magnitude; callers decide
/// the sign.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{CURRENCY_SYMBOL}{grouped}")
}
