//! # Storage Module
//!
//! Persistence for expenses, budgets and budget alerts.
//!
//! The database is treated as a plain row store: repositories run filtered
//! queries and map rows into domain models, while every sum, percentage and
//! grouping happens in the domain layer.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through SQLx, schema created on startup
//! - **Tests**: a private in-memory database per test

pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::DbConnection;
pub use error::StorageError;
pub use repositories::{BudgetAlertRepository, BudgetRepository, ExpenseRepository};
