pub mod analytics;
pub mod budget;
pub mod category;
pub mod checklist;
pub mod color;
pub mod ledger;
pub mod transaction;
