pub mod alert_mapper;
pub mod budget_mapper;
pub mod dashboard_mapper;
pub mod expense_mapper;

pub use alert_mapper::AlertMapper;
pub use budget_mapper::BudgetMapper;
pub use dashboard_mapper::DashboardMapper;
pub use expense_mapper::ExpenseMapper;
