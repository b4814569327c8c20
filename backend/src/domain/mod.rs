//! # Domain Module
//!
//! Business logic for the spending tracker.
//!
//! ## Module Organization
//!
//! - **models**: expenses, budgets, alerts and the budget month value type
//! - **spending**: pure rules deriving budget progress and due alerts
//! - **expense_service**: expense CRUD and filtering
//! - **budget_service**: budget CRUD, each budget paired with its spending
//! - **alert_service**: raising, listing and acknowledging budget alerts
//! - **dashboard_service**: monthly totals, category split and six-month trend
//! - **export_service**: CSV rendering of expense lists
//!
//! ## Business Rules
//!
//! - Every record belongs to exactly one user and is invisible to others
//! - Budget spending is derived from expenses on every read, never stored
//! - A budget month covers its first through last calendar day inclusive
//! - At most one unread alert of each kind exists per budget

pub mod alert_service;
pub mod budget_service;
pub mod dashboard_service;
pub mod error;
pub mod expense_service;
pub mod export_service;
pub mod models;
pub mod spending;

pub use alert_service::{AlertFeed, AlertService};
pub use budget_service::BudgetService;
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use error::{DomainError, ValidationError};
pub use expense_service::{ExpenseRevision, ExpenseService};
pub use export_service::{CsvExport, ExportService};
pub use spending::{BudgetSpending, DueAlert, SpendingStatus};
