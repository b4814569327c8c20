//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! ## Key Responsibilities
//!
//! - **Authentication**: resolving the calling user from request headers
//! - **API Endpoints**: axum handlers for expenses, budgets, alerts,
//!   dashboard, export and reference data
//! - **Error Translation**: domain errors become status codes with a JSON
//!   `{"error", "code"}` body
//! - **Mapping**: domain models are converted to the `shared` wire types

pub mod auth;
pub mod rest;

pub use auth::{AuthenticatedUser, USER_ID_HEADER};
