//! Workstation API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/workstations | GET | List workstations |
//! | /api/workstations | POST | Create workstation |
//! | /api/workstations/{id} | GET | Fetch one workstation |
//! | /api/workstations/{id} | PUT | Update name/kind/status |
//! | /api/workstations/{id} | DELETE | Delete (rejected while in use) |
//! | /api/workstations/{id}/staff | PUT | Assign staff member |
//! | /api/workstations/{id}/staff | DELETE | Unassign staff member |

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/workstations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/staff",
            put(handler::assign_staff).delete(handler::unassign_staff),
        )
}
