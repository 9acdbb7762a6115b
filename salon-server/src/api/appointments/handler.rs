//! Appointment API handlers
//!
//! Dates and times arrive as strings (`YYYY-MM-DD`, `HH:MM`) and are
//! parsed here; the scheduling core only sees typed values. Transition
//! routes accept the acting operator as an `operator` query parameter.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::time::{parse_date, parse_time};
use crate::utils::{AppError, AppResult};
use shared::models::{Appointment, AppointmentPatch, BookAppointment, TransitionRequest};

/// POST /api/appointments body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub customer_id: String,
    pub service_id: String,
    #[serde(default)]
    pub workstation_id: Option<String>,
    #[serde(default)]
    pub staff_id: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

/// PUT /api/appointments/{id} body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub workstation_id: Option<String>,
    #[serde(default)]
    pub clear_workstation: bool,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub clear_staff: bool,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

/// POST /api/appointments - book an appointment
pub async fn book(
    State(state): State<ServerState>,
    Json(payload): Json<BookRequest>,
) -> AppResult<Json<Appointment>> {
    let req = BookAppointment {
        customer_id: payload.customer_id,
        service_id: payload.service_id,
        workstation_id: payload.workstation_id,
        staff_id: payload.staff_id,
        date: parse_date(&payload.date)?,
        time: parse_time(&payload.time)?,
        duration_minutes: payload.duration,
        total_amount: payload.total_amount,
        notes: payload.notes,
        operator: payload.operator,
    };
    let appointment = state.scheduler().book_appointment(req).map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// GET /api/appointments - list open appointments
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = state
        .scheduler()
        .list_open_appointments()
        .map_err(AppError::from)?;
    Ok(Json(appointments))
}

/// GET /api/appointments/{id} - fetch one appointment
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .get_appointment(&id)
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))?;
    Ok(Json(appointment))
}

/// PUT /api/appointments/{id} - edit while pending/confirmed
pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EditRequest>,
) -> AppResult<Json<Appointment>> {
    let patch = AppointmentPatch {
        service_id: payload.service_id,
        workstation_id: payload.workstation_id,
        clear_workstation: payload.clear_workstation,
        staff_id: payload.staff_id,
        clear_staff: payload.clear_staff,
        date: payload.date.as_deref().map(parse_date).transpose()?,
        time: payload.time.as_deref().map(parse_time).transpose()?,
        duration_minutes: payload.duration,
        total_amount: payload.total_amount,
        notes: payload.notes,
        operator: payload.operator,
    };
    let appointment = state
        .scheduler()
        .edit_appointment(&id, patch)
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/{id}/confirm
pub async fn confirm(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .confirm_appointment(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/{id}/checkin
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .check_in(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/{id}/checkout
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .check_out(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .cancel_appointment(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/{id}/no-show
pub async fn no_show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TransitionRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .scheduler()
        .mark_no_show(&id, query.operator.as_deref())
        .map_err(AppError::from)?;
    Ok(Json(appointment))
}
