//! Customer summary API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/customers/{id}/summary | GET | Visit summary |
//! | /api/customers/{id}/summary/recompute | POST | Rebuild from completed appointments |

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/summary", get(handler::summary))
        .route("/{id}/summary/recompute", post(handler::recompute))
}
