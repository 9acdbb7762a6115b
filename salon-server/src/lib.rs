//! Salon scheduling server
//!
//! The appointment lifecycle and resource-assignment core of a salon
//! management system, exposed over a small HTTP API.
//!
//! # Module structure
//!
//! ```text
//! salon-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── scheduling/    # the transactional scheduling core
//! ├── activity/      # fire-and-forget activity events
//! └── utils/         # error envelope, logger, time, validation
//! ```

pub mod activity;
pub mod api;
pub mod core;
pub mod scheduling;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use scheduling::{ScheduleError, ScheduleStore, SchedulingService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging from the environment
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
