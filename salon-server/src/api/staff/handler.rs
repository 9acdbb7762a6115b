//! Staff API handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{StaffCreate, StaffMember};

/// GET /api/staff - list staff members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StaffMember>>> {
    let staff = state.scheduler().list_staff().map_err(AppError::from)?;
    Ok(Json(staff))
}

/// POST /api/staff - create a staff member
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffMember>> {
    let staff = state.scheduler().create_staff(payload).map_err(AppError::from)?;
    Ok(Json(staff))
}
