//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`appointments`] - booking and lifecycle transitions
//! - [`workstations`] - workstation administration and staff assignment
//! - [`staff`] - staff directory
//! - [`customers`] - visit summaries

pub mod appointments;
pub mod customers;
pub mod health;
pub mod staff;
pub mod workstations;

use axum::Router;

use crate::core::ServerState;

/// The full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(appointments::router())
        .merge(workstations::router())
        .merge(staff::router())
        .merge(customers::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
