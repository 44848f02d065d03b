use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::ColorComponents;
use super::transaction::TransactionKind;

/// Identifier of the fixed "uncategorized" sentinel category.
pub const UNCATEGORIZED_ID: &str = "none";

/// A named, colored grouping of transactions, scoped to one kind.
///
/// Exactly one sentinel category exists (id [`UNCATEGORIZED_ID`]): it is
/// flagged `is_default`, carries kind `All` so it matches both income and
/// expense queries, and can never be edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: ColorComponents,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon_name: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        color: ColorComponents,
        kind: TransactionKind,
        icon_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color,
            kind,
            icon_name: icon_name.into(),
            is_default: false,
        }
    }

    /// The sentinel fallback category every absent or dangling reference
    /// resolves to.
    #[must_use]
    pub fn uncategorized() -> Self {
        Self {
            id: UNCATEGORIZED_ID.to_string(),
            name: "Uncategorized".to_string(),
            color: ColorComponents::GRAY,
            kind: TransactionKind::All,
            icon_name: "questionmark.circle".to_string(),
            is_default: true,
        }
    }

    /// Income categories seeded on first run.
    #[must_use]
    pub fn default_income_categories() -> Vec<Self> {
        vec![
            Self::new("Salary", ColorComponents::GREEN, TransactionKind::Income, "banknote"),
            Self::new("Side Income", ColorComponents::BLUE, TransactionKind::Income, "briefcase"),
            Self::new("Investment", ColorComponents::PURPLE, TransactionKind::Income, "chart.line.uptrend.xyaxis"),
            Self::new("Other Income", ColorComponents::MINT, TransactionKind::Income, "plus.circle"),
        ]
    }

    /// Expense categories seeded on first run.
    #[must_use]
    pub fn default_expense_categories() -> Vec<Self> {
        vec![
            Self::new("Food", ColorComponents::RED, TransactionKind::Expense, "fork.knife"),
            Self::new("Transport", ColorComponents::ORANGE, TransactionKind::Expense, "car"),
            Self::new("Shopping", ColorComponents::PINK, TransactionKind::Expense, "bag"),
            Self::new("Entertainment", ColorComponents::YELLOW, TransactionKind::Expense, "gamecontroller"),
            Self::new("Household", ColorComponents::BROWN, TransactionKind::Expense, "house"),
            Self::new("Other", ColorComponents::GRAY, TransactionKind::Expense, "ellipsis.circle"),
        ]
    }
}
