//! Workstation API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{
    AssignStaffRequest, TransitionRequest, Workstation, WorkstationCreate, WorkstationUpdate,
};

/// GET /api/workstations - list all workstations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Workstation>>> {
    let workstations = state.scheduler().list_workstations().map_err(AppError::from)?;
    Ok(Json(workstations))
}

/// GET /api/workstations/{id} - fetch one workstation
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Workstation>> {
    let workstation = state
        .scheduler()
        .get_workstation(&id)
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Workstation {} not found", id)))?;
    Ok(Json(workstation))
}

/// POST /api/workstations - create a workstation
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WorkstationCreate>,
) -> AppResult<Json<Workstation>> {
    let workstation = state
        .scheduler()
        .create_workstation(payload)
        .map_err(AppError::from)?;
    Ok(Json(workstation))
}

/// PUT /api/workstations/{id} - update name, kind or status
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WorkstationUpdate>,
) -> AppResult<Json<Workstation>> {
    let workstation = state
        .scheduler()
        .update_workstation(&id, payload)
        .map_err(AppError::from)?;
    Ok(Json(workstation))
}

/// DELETE /api/workstations/{id} - delete when no open appointments remain
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<bool>> {
    state
        .scheduler()
        .delete_workstation(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(true))
}

/// PUT /api/workstations/{id}/staff - bind a staff member
pub async fn assign_staff(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssignStaffRequest>,
) -> AppResult<Json<Workstation>> {
    let workstation = state
        .scheduler()
        .assign_staff(&id, &payload.staff_id, payload.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(workstation))
}

/// DELETE /api/workstations/{id}/staff - clear the staff binding
pub async fn unassign_staff(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Workstation>> {
    let workstation = state
        .scheduler()
        .unassign_staff(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(workstation))
}
