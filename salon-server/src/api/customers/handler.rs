//! Customer summary API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{TransitionRequest, VisitSummary};

/// GET /api/customers/{id}/summary - current visit summary
pub async fn summary(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<VisitSummary>> {
    let summary = state.scheduler().customer_summary(&id).map_err(AppError::from)?;
    Ok(Json(summary))
}

/// POST /api/customers/{id}/summary/recompute - repair/backfill path
pub async fn recompute(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<VisitSummary>> {
    let summary = state
        .scheduler()
        .recompute_customer_summary(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(summary))
}
