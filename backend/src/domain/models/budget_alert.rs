//! Domain model for a budget alert.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Spending entered the warning band
    Threshold,
    OverBudget,
    /// Recognized when reading stored rows; never generated by the spending rules
    MonthlySummary,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Threshold => "threshold",
            AlertKind::OverBudget => "over_budget",
            AlertKind::MonthlySummary => "monthly_summary",
        }
    }

    pub fn parse(input: &str) -> Result<Self, String> {
        match input {
            "threshold" => Ok(AlertKind::Threshold),
            "over_budget" => Ok(AlertKind::OverBudget),
            "monthly_summary" => Ok(AlertKind::MonthlySummary),
            _ => Err(format!("Invalid alert type: {}", input)),
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alerts never change after creation except for `is_read`, which only
/// moves from false to true.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub id: String,
    pub user_id: String,
    pub budget_id: Option<String>,
    pub kind: AlertKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

impl BudgetAlert {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kind_round_trip_names() {
        for kind in [AlertKind::Threshold, AlertKind::OverBudget, AlertKind::MonthlySummary] {
            assert_eq!(AlertKind::parse(kind.as_str()), Ok(kind));
        }
        assert!(AlertKind::parse("warning").is_err());
    }
}
