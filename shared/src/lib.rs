use serde::{Deserialize, Serialize};

/// Expense categories offered to users, in display order
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Education",
    "Travel",
    "Insurance",
    "Other",
];

/// Payment methods offered to users, in display order
pub const PAYMENT_METHODS: [&str; 6] = [
    "Cash",
    "Credit Card",
    "Debit Card",
    "Digital Wallet",
    "Bank Transfer",
    "Check",
];

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    /// Amount spent, always positive
    pub amount: f64,
    pub category: String,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub date: String,
    pub description: Option<String>,
    pub payment_method: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub category: String,
    /// Calendar date of the expense (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    pub payment_method: String,
}

/// Partial update - omitted fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// An empty string clears the description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Optional filters applied when listing or exporting expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilters {
    /// Inclusive lower bound (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    /// Sum of the amounts of the returned expenses
    pub total_amount: f64,
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    /// Budget month (YYYY-MM)
    pub month: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Display tier for a budget's progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Critical,
    OverBudget,
}

/// A budget together with the spending recorded against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetWithSpending {
    #[serde(flatten)]
    pub budget: Budget,
    pub actual_spending: f64,
    /// May be negative once the budget is exceeded
    pub remaining: f64,
    pub percentage_used: f64,
    pub is_over_budget: bool,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub amount: f64,
    pub category: String,
    /// Budget month (YYYY-MM)
    pub month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub month: String,
    pub budgets: Vec<BudgetWithSpending>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Threshold,
    OverBudget,
    MonthlySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: String,
    pub user_id: String,
    /// Cleared when the budget is deleted
    pub budget_id: Option<String>,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertListResponse {
    pub alerts: Vec<BudgetAlert>,
    pub unread_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAlertsReadResponse {
    pub updated_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    /// Share of the month's total, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// Chart label such as "Mar 2024"
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_this_month: f64,
    pub total_last_month: f64,
    pub percentage_change: f64,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataResponse {
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl ReferenceDataResponse {
    pub fn current() -> Self {
        Self {
            categories: EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            payment_methods: PAYMENT_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}
