//! Calendar month used to scope budgets and spending summaries.
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;

use crate::domain::error::ValidationError;

/// Years that render as four digits, so stored dates sort as text
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonth {
    first_day: NaiveDate,
}

impl BudgetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(ValidationError::InvalidMonth(format!("{}-{:02}", year, month)));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| ValidationError::InvalidMonth(format!("{}-{:02}", year, month)))
    }

    /// Parse the `YYYY-MM` wire format
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingMonth);
        }

        let invalid = || ValidationError::InvalidMonth(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Months::new(1) - Duration::days(1)
    }

    pub fn previous(&self) -> Self {
        self.months_back(1)
    }

    pub fn months_back(&self, months: u32) -> Self {
        Self {
            first_day: self.first_day - Months::new(months),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Short chart label, e.g. `Mar 2024`
    pub fn label(&self) -> String {
        self.first_day.format("%b %Y").to_string()
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
