use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::models::color::ColorComponents;
use crate::models::transaction::{Transaction, TransactionKind};
use crate::services::category_service;
use crate::storage::shared::SharedStore;

/// Key the snapshot is written under in the shared store.
pub const WIDGET_SNAPSHOT_KEY: &str = "expenses";

/// Reduced, denormalized projection of a transaction for the home-screen
/// widget: category name and color are resolved at export time so the
/// widget's reader never needs the category collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    pub id: String,
    pub amount: f64,
    pub date: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub remark: String,
    pub category_name: String,
    pub category_color: ColorComponents,
}

/// One-way, fire-and-forget export of the transaction collection into the
/// shared store, triggered after every transaction mutation and once at
/// startup. Never reads back; never propagates failure.
#[derive(Debug, Clone)]
pub struct WidgetSnapshotExporter {
    store: SharedStore,
}

impl WidgetSnapshotExporter {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Project every transaction and overwrite the shared snapshot.
    pub fn export(&self, transactions: &[Transaction], categories: &[Category]) {
        let records: Vec<WidgetRecord> = transactions
            .iter()
            .map(|t| {
                let category = category_service::resolve_in(categories, t.category_id.as_deref());
                WidgetRecord {
                    id: t.id.clone(),
                    amount: t.amount,
                    date: t.date,
                    kind: t.kind,
                    remark: t.remark.clone(),
                    category_name: category.name,
                    category_color: category.color,
                }
            })
            .collect();

        let bytes = match serde_json::to_vec(&records) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("widget snapshot serialization failed: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(WIDGET_SNAPSHOT_KEY, &bytes) {
            warn!("widget snapshot export failed: {e}");
        }
    }
}
