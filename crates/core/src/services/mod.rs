pub mod analytics_service;
pub mod budget_service;
pub mod category_service;
pub mod checklist_service;
pub mod transaction_service;
