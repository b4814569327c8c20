pub mod budget_alert_repository;
pub mod budget_repository;
pub mod expense_repository;

pub use budget_alert_repository::BudgetAlertRepository;
pub use budget_repository::BudgetRepository;
pub use expense_repository::ExpenseRepository;
