use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending cap over a named date window.
///
/// The spent amount is not stored here: it is recomputed from the expense
/// transactions inside `[start_date, end_date]` on every read, so it always
/// reflects the latest transaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub total_amount: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        total_amount: f64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            total_amount,
            start_date,
            end_date,
        }
    }

    /// A budget is completed once the current time is past its end date.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        Utc::now() > self.end_date
    }

    /// Both bounds rendered as `yyyy/mm/dd - yyyy/mm/dd`.
    #[must_use]
    pub fn date_range_string(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%Y/%m/%d"),
            self.end_date.format("%Y/%m/%d")
        )
    }
}
