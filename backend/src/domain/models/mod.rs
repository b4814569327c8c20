pub mod budget;
pub mod budget_alert;
pub mod expense;
pub mod month;

pub use budget::Budget;
pub use budget_alert::{AlertKind, BudgetAlert};
pub use expense::{Expense, ExpenseCategory, ExpenseQuery, PaymentMethod};
pub use month::BudgetMonth;

use chrono::{SecondsFormat, Utc};

/// Storage and wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// RFC 3339 UTC timestamp with fixed precision, so stored values sort
/// lexically in creation order
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
