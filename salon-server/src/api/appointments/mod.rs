//! Appointment API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/appointments | POST | Book an appointment |
//! | /api/appointments | GET | List open appointments |
//! | /api/appointments/{id} | GET | Fetch one appointment |
//! | /api/appointments/{id} | PUT | Edit while pending/confirmed |
//! | /api/appointments/{id}/confirm | PATCH | pending → confirmed |
//! | /api/appointments/{id}/checkin | PATCH | confirmed → in-progress |
//! | /api/appointments/{id}/checkout | PATCH | in-progress → completed |
//! | /api/appointments/{id}/cancel | PATCH | → cancelled |
//! | /api/appointments/{id}/no-show | PATCH | confirmed → no-show |

mod handler;

use axum::{Router, routing::{get, patch}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/appointments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::book))
        .route("/{id}", get(handler::get_by_id).put(handler::edit))
        .route("/{id}/confirm", patch(handler::confirm))
        .route("/{id}/checkin", patch(handler::check_in))
        .route("/{id}/checkout", patch(handler::check_out))
        .route("/{id}/cancel", patch(handler::cancel))
        .route("/{id}/no-show", patch(handler::no_show))
}
