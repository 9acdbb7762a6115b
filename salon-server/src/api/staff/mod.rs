//! Staff API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/staff | GET | List staff |
//! | /api/staff | POST | Create a staff member |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list).post(handler::create))
}
