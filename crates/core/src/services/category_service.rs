use crate::models::category::Category;
use crate::models::ledger::Ledger;
use crate::models::transaction::TransactionKind;

/// Manages the category collection: seeding, sentinel rules, and the
/// cascade that keeps transaction references from dangling.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Replace the collection with the fixed default set: the sentinel
    /// followed by the default income and expense categories.
    pub fn seed_defaults(&self, ledger: &mut Ledger) {
        let mut categories = vec![Category::uncategorized()];
        categories.extend(Category::default_income_categories());
        categories.extend(Category::default_expense_categories());
        ledger.categories = categories;
    }

    pub fn add(&self, ledger: &mut Ledger, category: Category) {
        ledger.categories.push(category);
    }

    /// Replace the category with a matching id. The sentinel is immutable:
    /// updates targeting a default category are silent no-ops, as are
    /// updates with an unknown id. Returns whether anything changed.
    pub fn update(&self, ledger: &mut Ledger, category: Category) -> bool {
        match ledger.categories.iter().position(|c| c.id == category.id) {
            Some(idx) if !ledger.categories[idx].is_default => {
                ledger.categories[idx] = category;
                true
            }
            _ => false,
        }
    }

    /// Remove a category, cascading first: every transaction referencing it
    /// has its reference cleared so it resolves to the sentinel.
    ///
    /// Returns the number of reassigned transactions, or `None` when the
    /// operation was a no-op (unknown id, or the non-deletable sentinel).
    pub fn remove(&self, ledger: &mut Ledger, id: &str) -> Option<usize> {
        let idx = ledger.categories.iter().position(|c| c.id == id)?;
        if ledger.categories[idx].is_default {
            return None;
        }

        let mut reassigned = 0;
        for transaction in &mut ledger.transactions {
            if transaction.category_id.as_deref() == Some(id) {
                transaction.category_id = None;
                reassigned += 1;
            }
        }

        ledger.categories.remove(idx);
        Some(reassigned)
    }

    /// Categories whose kind matches exactly, plus the sentinel `All` kind.
    pub fn for_kind<'a>(&self, ledger: &'a Ledger, kind: TransactionKind) -> Vec<&'a Category> {
        ledger
            .categories
            .iter()
            .filter(|c| c.kind == kind || c.kind == TransactionKind::All)
            .collect()
    }

    /// Resolve a possibly-absent category id, falling back to the sentinel.
    /// Every transaction therefore always renders with some valid category.
    pub fn resolve(&self, ledger: &Ledger, id: Option<&str>) -> Category {
        resolve_in(&ledger.categories, id)
    }
}

/// Slice-level resolution shared with the widget exporter, which works from
/// borrowed collections rather than the ledger.
#[must_use]
pub fn resolve_in(categories: &[Category], id: Option<&str>) -> Category {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .cloned()
        .unwrap_or_else(Category::uncategorized)
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
